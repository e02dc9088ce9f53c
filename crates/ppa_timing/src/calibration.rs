//! Scale-aware calibration of predicted path slacks.
//!
//! A path-level model predicts one slack per sampled path. The design's
//! reported WNS is not the minimum of that population, which is too
//! pessimistic, but a percentile whose position moves toward the pessimistic
//! tail as the design grows.

use ppa_config::CalibrationPolicy;
use ppa_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CalibrationError;

/// A percentile of a descending-sorted slack population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Percentile {
    /// 10th percentile.
    P10,
    /// 50th percentile (median position).
    P50,
    /// 90th percentile.
    P90,
}

impl Percentile {
    /// Position as a fraction of the population.
    pub fn fraction(self) -> f64 {
        match self {
            Percentile::P10 => 0.1,
            Percentile::P50 => 0.5,
            Percentile::P90 => 0.9,
        }
    }

    /// Selects the percentile for a design with `seq_bits` register bits.
    pub fn for_scale(seq_bits: u64, policy: &CalibrationPolicy) -> Self {
        let kilo = seq_bits as f64 / 1000.0;
        if kilo <= policy.small_scale_kilo {
            Percentile::P10
        } else if kilo <= policy.medium_scale_kilo {
            Percentile::P50
        } else {
            Percentile::P90
        }
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentile::P10 => f.write_str("p10"),
            Percentile::P50 => f.write_str("p50"),
            Percentile::P90 => f.write_str("p90"),
        }
    }
}

/// Number of predicted slacks to keep for a design with `seq_bits` register
/// bits.
///
/// The raw size is `seq_bits * sample_ratio`. Above `max_samples` it is
/// capped; below `sparse_floor` it is forced to `min_samples`; otherwise it
/// is rounded half-to-even.
pub fn sample_size(seq_bits: u64, policy: &CalibrationPolicy) -> usize {
    let raw = seq_bits as f64 * policy.sample_ratio;
    if raw > policy.max_samples as f64 {
        policy.max_samples
    } else if raw < policy.sparse_floor {
        policy.min_samples
    } else {
        raw.round_ties_even() as usize
    }
}

/// Index of `fraction` into a population of `n`: `round(fraction * n)`,
/// clamped to the last element.
pub fn percentile_index(n: usize, fraction: f64) -> usize {
    let idx = (fraction * n as f64).round_ties_even() as usize;
    idx.min(n.saturating_sub(1))
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<(), CalibrationError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(CalibrationError::NonFinite {
            what,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// The calibrated estimate of one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Samples actually used.
    pub sample_len: usize,
    /// The scale-selected percentile slack.
    pub calibrated_wns: f64,
    /// Which percentile was selected.
    pub percentile: Percentile,
    /// Scale-independent `[p10, p50, p90]`.
    pub spread: [f64; 3],
    /// Population median.
    pub median: f64,
    /// Population mean.
    pub mean: f64,
}

impl Calibration {
    /// Calibrates `predicted` for a design with `seq_bits` register bits.
    ///
    /// The population is truncated to `min(sample_size, predicted.len())`
    /// in the given order, then sorted descending.
    pub fn compute(
        seq_bits: u64,
        predicted: &[f64],
        policy: &CalibrationPolicy,
    ) -> Result<Self, CalibrationError> {
        let sample_len = sample_size(seq_bits, policy).min(predicted.len());
        let sample = &predicted[..sample_len];
        if sample.is_empty() {
            return Err(CalibrationError::EmptyPopulation {
                what: "predicted slack",
            });
        }
        check_finite("predicted slack", sample)?;

        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));

        let pick = |p: Percentile| sorted[percentile_index(sorted.len(), p.fraction())];
        let percentile = Percentile::for_scale(seq_bits, policy);
        Ok(Self {
            sample_len,
            calibrated_wns: pick(percentile),
            percentile,
            spread: [pick(Percentile::P10), pick(Percentile::P50), pick(Percentile::P90)],
            median: median(&sorted),
            mean: mean(&sorted),
        })
    }
}

/// [`Calibration::compute`] with a `C001` note on success.
pub fn calibrate(
    seq_bits: u64,
    predicted: &[f64],
    policy: &CalibrationPolicy,
    sink: &DiagnosticSink,
) -> Result<Calibration, CalibrationError> {
    let c = Calibration::compute(seq_bits, predicted, policy)?;
    sink.emit(
        Diagnostic::note(
            DiagnosticCode::new(Category::Calibration, 1),
            format!("calibrated WNS {:.4} ns", c.calibrated_wns),
        )
        .with_note(format!(
            "{} of {} samples, {} for {} register bits",
            c.sample_len,
            predicted.len(),
            c.percentile,
            seq_bits
        )),
    );
    Ok(c)
}

/// A calibrated estimate next to the reference slacks of the same design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Design name.
    pub design: String,
    /// Worst reference slack.
    pub reference_wns: f64,
    /// Best reference slack.
    pub reference_best: f64,
    /// The calibrated prediction.
    pub calibrated_wns: f64,
    /// Mean of the predicted population.
    pub predicted_mean: f64,
}

impl ValidationRecord {
    /// Pairs `calibration` with reference slacks parsed from a report.
    pub fn new(
        design: impl Into<String>,
        reference: &[f64],
        calibration: &Calibration,
    ) -> Result<Self, CalibrationError> {
        if reference.is_empty() {
            return Err(CalibrationError::EmptyPopulation {
                what: "reference slack",
            });
        }
        check_finite("reference slack", reference)?;
        Ok(Self {
            design: design.into(),
            reference_wns: reference.iter().copied().fold(f64::INFINITY, f64::min),
            reference_best: reference.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            calibrated_wns: calibration.calibrated_wns,
            predicted_mean: calibration.mean,
        })
    }
}

/// Accuracy of calibrated WNS against reference WNS across designs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of designs.
    pub designs: usize,
    /// Pearson correlation; `None` with fewer than two designs or no
    /// variance.
    pub pearson_r: Option<f64>,
    /// Mean absolute percentage error, each design capped at 100 %.
    pub mape: f64,
    /// Root relative squared error; `None` when the reference has no
    /// variance.
    pub rrse: Option<f64>,
}

impl ValidationSummary {
    /// Summarises `records`.
    pub fn from_records(records: &[ValidationRecord]) -> Result<Self, CalibrationError> {
        if records.is_empty() {
            return Err(CalibrationError::EmptyPopulation {
                what: "validation record",
            });
        }
        let truth: Vec<f64> = records.iter().map(|r| r.reference_wns).collect();
        let pred: Vec<f64> = records.iter().map(|r| r.calibrated_wns).collect();
        let n = records.len();
        let mean_t = mean(&truth);
        let mean_p = mean(&pred);

        let mut cov = 0.0;
        let mut var_t = 0.0;
        let mut var_p = 0.0;
        let mut sq_err = 0.0;
        let mut pct = 0.0;
        for (&t, &p) in truth.iter().zip(&pred) {
            cov += (t - mean_t) * (p - mean_p);
            var_t += (t - mean_t).powi(2);
            var_p += (p - mean_p).powi(2);
            sq_err += (p - t).powi(2);
            pct += if t == 0.0 {
                if p == 0.0 {
                    0.0
                } else {
                    1.0
                }
            } else {
                ((p - t) / t).abs().min(1.0)
            };
        }

        let pearson_r = (n >= 2 && var_t > 0.0 && var_p > 0.0).then(|| cov / (var_t * var_p).sqrt());
        let rrse = (var_t > 0.0).then(|| (sq_err / var_t).sqrt());
        Ok(Self {
            designs: n,
            pearson_r,
            mape: pct / n as f64 * 100.0,
            rrse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CalibrationPolicy {
        CalibrationPolicy::default()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percentile_by_scale() {
        assert_eq!(Percentile::for_scale(2500, &policy()), Percentile::P10);
        assert_eq!(Percentile::for_scale(3000, &policy()), Percentile::P10);
        assert_eq!(Percentile::for_scale(4000, &policy()), Percentile::P50);
        assert_eq!(Percentile::for_scale(5000, &policy()), Percentile::P50);
        assert_eq!(Percentile::for_scale(6000, &policy()), Percentile::P90);
    }

    #[test]
    fn sample_size_clamps() {
        assert_eq!(sample_size(100, &policy()), 100);
        assert_eq!(sample_size(5_000_000, &policy()), 1000);
        assert_eq!(sample_size(50_000, &policy()), 1000);
        assert_eq!(sample_size(10_000, &policy()), 200);
        assert_eq!(sample_size(500, &policy()), 10);
        // 0.02 * 625 = 12.5 rounds to even
        assert_eq!(sample_size(625, &policy()), 12);
    }

    #[test]
    fn percentile_index_clamps_to_last() {
        assert_eq!(percentile_index(10, 0.9), 9);
        assert_eq!(percentile_index(10, 0.5), 5);
        assert_eq!(percentile_index(1, 0.9), 0);
        assert_eq!(percentile_index(5, 0.1), 0);
        assert_eq!(percentile_index(15, 0.1), 2);
    }

    fn population() -> Vec<f64> {
        // -0.00, -0.01, ..., -0.19, shuffled by stride
        (0..20).map(|i| -(((i * 7) % 20) as f64) / 100.0).collect()
    }

    #[test]
    fn calibrates_small_design() {
        let c = Calibration::compute(2500, &population(), &policy()).unwrap();
        assert_eq!(c.sample_len, 20);
        assert_eq!(c.percentile, Percentile::P10);
        assert!(approx(c.calibrated_wns, -0.02));
        assert!(approx(c.spread[0], -0.02));
        assert!(approx(c.spread[1], -0.10));
        assert!(approx(c.spread[2], -0.18));
        assert!(approx(c.median, -0.095));
        assert!(approx(c.mean, -0.095));
    }

    #[test]
    fn large_design_is_more_pessimistic() {
        let small = Calibration::compute(2500, &population(), &policy()).unwrap();
        let large = Calibration::compute(6000, &population(), &policy()).unwrap();
        assert_eq!(large.percentile, Percentile::P90);
        assert!(large.calibrated_wns < small.calibrated_wns);
        assert_eq!(large.spread, small.spread);
    }

    #[test]
    fn truncates_before_sorting() {
        let mut predicted = vec![-0.5; 10];
        predicted.extend(vec![-9.0; 200]);
        // seq 500 -> 10 samples, all -0.5
        let c = Calibration::compute(500, &predicted, &policy()).unwrap();
        assert_eq!(c.sample_len, 10);
        assert_eq!(c.calibrated_wns, -0.5);
    }

    #[test]
    fn empty_and_non_finite() {
        assert!(matches!(
            Calibration::compute(100, &[], &policy()),
            Err(CalibrationError::EmptyPopulation { .. })
        ));
        assert!(matches!(
            Calibration::compute(100, &[-0.1, f64::NAN], &policy()),
            Err(CalibrationError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn calibrate_emits_note() {
        let sink = DiagnosticSink::new();
        calibrate(2500, &population(), &policy(), &sink).unwrap();
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.to_string(), "C001");
        assert!(diags[0].notes[0].contains("p10"));
    }

    #[test]
    fn validation_record() {
        let c = Calibration::compute(2500, &population(), &policy()).unwrap();
        let r = ValidationRecord::new("uart", &[-0.3, 0.1, -0.05], &c).unwrap();
        assert_eq!(r.reference_wns, -0.3);
        assert_eq!(r.reference_best, 0.1);
        assert_eq!(r.calibrated_wns, c.calibrated_wns);
        assert!(ValidationRecord::new("uart", &[], &c).is_err());
    }

    fn record(reference_wns: f64, calibrated_wns: f64) -> ValidationRecord {
        ValidationRecord {
            design: "d".to_string(),
            reference_wns,
            reference_best: 0.0,
            calibrated_wns,
            predicted_mean: 0.0,
        }
    }

    #[test]
    fn perfect_prediction_summary() {
        let records = [record(-0.1, -0.1), record(-0.2, -0.2), record(-0.4, -0.4)];
        let s = ValidationSummary::from_records(&records).unwrap();
        assert_eq!(s.designs, 3);
        assert!(approx(s.pearson_r.unwrap(), 1.0));
        assert!(approx(s.mape, 0.0));
        assert!(approx(s.rrse.unwrap(), 0.0));
    }

    #[test]
    fn mape_is_capped() {
        let records = [record(-0.1, -0.5), record(-0.2, -0.1)];
        let s = ValidationSummary::from_records(&records).unwrap();
        // errors 400 % -> 100 %, 50 %
        assert!(approx(s.mape, 75.0));
    }

    #[test]
    fn degenerate_summary() {
        let s = ValidationSummary::from_records(&[record(-0.1, -0.2)]).unwrap();
        assert_eq!(s.pearson_r, None);
        assert_eq!(s.rrse, None);
        assert!(ValidationSummary::from_records(&[]).is_err());
    }
}
