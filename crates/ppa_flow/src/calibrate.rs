//! Slack calibration driver.

use ppa_common::DesignKey;
use ppa_config::CalibrationPolicy;
use ppa_diagnostics::DiagnosticSink;
use ppa_graph::{read_registry, SignalGraph};
use ppa_timing::{calibrate, read_reference_report, Calibration, ValidationRecord};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{FlowError, InDesign};
use crate::vectors::{read_vector, write_vector};

/// Where the calibration inputs live and where results go.
#[derive(Debug, Clone)]
pub struct CalibrationDirs {
    /// Holds `{stem}_node_dict.bin`.
    pub registry_dir: PathBuf,
    /// Holds the predicted slacks, `{design}_rf.json`.
    pub predicted_dir: PathBuf,
    /// Receives `{design}_rf.json` and `{design}_rf_mul.json`.
    pub out_dir: PathBuf,
    /// Holds `{design}.rpt`, when validating.
    pub reference_dir: Option<PathBuf>,
}

/// Result of a calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationOutcome {
    /// Register bits counted from the registry.
    pub seq_bits: u64,
    /// The calibrated estimate.
    pub calibration: Calibration,
    /// Comparison with the reference report, if one was given.
    pub validation: Option<ValidationRecord>,
}

/// Calibrates the predicted slacks of `key`.
///
/// The design scale is the register bit count of the registry alone. When
/// `dirs.reference_dir` is set, the first `sample_len` slacks of the
/// reference report are parsed for a [`ValidationRecord`].
pub fn run_calibration(
    dirs: &CalibrationDirs,
    key: &DesignKey,
    policy: &CalibrationPolicy,
    sink: &DiagnosticSink,
) -> Result<CalibrationOutcome, FlowError> {
    let design = key.design.as_str();
    let registry = read_registry(&dirs.registry_dir, key).in_design(design)?;
    let seq_bits = SignalGraph::from_parts(BTreeMap::new(), registry).sequential_bits();

    let predicted = read_vector(&dirs.predicted_dir.join(key.slack_file())).in_design(design)?;
    let calibration = calibrate(seq_bits, &predicted, policy, sink).in_design(design)?;

    let validation = match &dirs.reference_dir {
        Some(dir) => {
            let reference = read_reference_report(
                &dir.join(key.reference_report_file()),
                calibration.sample_len,
                sink,
            )
            .in_design(design)?;
            Some(ValidationRecord::new(design, &reference, &calibration).in_design(design)?)
        }
        None => None,
    };

    write_outputs(&dirs.out_dir, key, &calibration).in_design(design)?;
    Ok(CalibrationOutcome {
        seq_bits,
        calibration,
        validation,
    })
}

fn write_outputs(
    out_dir: &Path,
    key: &DesignKey,
    calibration: &Calibration,
) -> Result<(), crate::error::FlowErrorKind> {
    write_vector(&out_dir.join(key.slack_file()), &[calibration.calibrated_wns])?;
    write_vector(&out_dir.join(key.slack_spread_file()), &calibration.spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowErrorKind;
    use ppa_graph::{write_graph, NodeKind};
    use ppa_timing::{CalibrationError, Percentile};

    fn setup(root: &Path, seq_bits: u32, predicted: &[f64]) -> (CalibrationDirs, DesignKey) {
        let key = DesignKey::new("riscv", "rtlil");
        let dirs = CalibrationDirs {
            registry_dir: root.join("graphs"),
            predicted_dir: root.join("pred"),
            out_dir: root.join("out"),
            reference_dir: None,
        };
        let mut g = SignalGraph::new();
        g.add_decl_node("regfile", NodeKind::Reg, Some(seq_bits), None);
        g.add_decl_node("And1", NodeKind::Operator, Some(64), None);
        write_graph(&dirs.registry_dir, &key, &g).unwrap();
        write_vector(&dirs.predicted_dir.join(key.slack_file()), predicted).unwrap();
        (dirs, key)
    }

    fn population() -> Vec<f64> {
        (0..200).map(|i| -(i as f64) / 1000.0).collect()
    }

    #[test]
    fn writes_calibrated_outputs() {
        let root = tempfile::tempdir().unwrap();
        let (dirs, key) = setup(root.path(), 4000, &population());
        let sink = DiagnosticSink::new();
        let outcome = run_calibration(&dirs, &key, &CalibrationPolicy::default(), &sink).unwrap();

        assert_eq!(outcome.seq_bits, 4000);
        // 4000 * 0.02 = 80 samples, median position
        assert_eq!(outcome.calibration.sample_len, 80);
        assert_eq!(outcome.calibration.percentile, Percentile::P50);
        assert_eq!(outcome.calibration.calibrated_wns, -0.04);
        assert!(outcome.validation.is_none());

        let wns = read_vector(&dirs.out_dir.join("riscv_rf.json")).unwrap();
        assert_eq!(wns, vec![-0.04]);
        let spread = read_vector(&dirs.out_dir.join("riscv_rf_mul.json")).unwrap();
        assert_eq!(spread, outcome.calibration.spread.to_vec());
        assert_eq!(sink.take_all()[0].code.to_string(), "C001");
    }

    #[test]
    fn validates_against_reference() {
        let root = tempfile::tempdir().unwrap();
        let (mut dirs, key) = setup(root.path(), 1000, &population());
        let rpt_dir = root.path().join("rpt");
        std::fs::create_dir_all(&rpt_dir).unwrap();
        std::fs::write(
            rpt_dir.join("riscv.rpt"),
            "  slack (VIOLATED)  -0.300\n  slack (MET)  0.050\n  slack ???\n",
        )
        .unwrap();
        dirs.reference_dir = Some(rpt_dir);

        let sink = DiagnosticSink::new();
        let outcome = run_calibration(&dirs, &key, &CalibrationPolicy::default(), &sink).unwrap();
        let record = outcome.validation.unwrap();
        assert_eq!(record.design, "riscv");
        assert_eq!(record.reference_wns, -0.3);
        assert_eq!(record.reference_best, 0.05);
        assert_eq!(record.calibrated_wns, outcome.calibration.calibrated_wns);
        assert!(sink.take_all().iter().any(|d| d.code.to_string() == "R001"));
    }

    #[test]
    fn empty_prediction_fails() {
        let root = tempfile::tempdir().unwrap();
        let (dirs, key) = setup(root.path(), 1000, &[]);
        let err = run_calibration(&dirs, &key, &CalibrationPolicy::default(), &DiagnosticSink::new())
            .unwrap_err();
        assert_eq!(err.design, "riscv");
        assert!(matches!(
            err.kind,
            FlowErrorKind::Calibration(CalibrationError::EmptyPopulation { .. })
        ));
    }
}
