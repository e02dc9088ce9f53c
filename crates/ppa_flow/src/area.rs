//! Area feature extraction.

use ppa_common::DesignKey;
use ppa_config::TechLibrary;
use ppa_cost::{AreaFeatures, CostModel};
use ppa_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use ppa_graph::{infer_widths, read_graph, SignalGraph};
use std::path::Path;

use crate::error::{FlowError, InDesign};
use crate::vectors::write_vector;

/// Completes widths and emits a `G001` summary.
pub(crate) fn resolve_widths(
    graph: &mut SignalGraph,
    key: &DesignKey,
    sink: &DiagnosticSink,
) -> Result<(), FlowError> {
    let report = infer_widths(graph).in_design(&key.design)?;
    sink.emit(
        Diagnostic::note(
            DiagnosticCode::new(Category::Graph, 1),
            format!(
                "inferred {} width(s) in {} pass(es)",
                report.inferred, report.passes
            ),
        )
        .with_subject(key.stem()),
    );
    Ok(())
}

/// Costs the graph of `key` and writes `{stem}_vec_area.json` to `out_dir`.
///
/// Emits an `A001` note with the area and power totals.
pub fn run_area(
    graph_dir: &Path,
    out_dir: &Path,
    key: &DesignKey,
    library: &TechLibrary,
    sink: &DiagnosticSink,
) -> Result<AreaFeatures, FlowError> {
    let mut graph = read_graph(graph_dir, key).in_design(&key.design)?;
    resolve_widths(&mut graph, key, sink)?;
    let features = CostModel::new(library)
        .evaluate(&graph)
        .in_design(&key.design)?;
    sink.emit(
        Diagnostic::note(
            DiagnosticCode::new(Category::Cost, 1),
            format!(
                "area {} ({} sequential, {} combinational), power {}",
                features.total_area, features.seq_area, features.comb_area, features.total_power
            ),
        )
        .with_subject(key.stem()),
    );
    write_vector(&out_dir.join(key.area_vector_file()), &features.to_vec())
        .in_design(&key.design)?;
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowErrorKind;
    use crate::vectors::read_vector;
    use ppa_graph::{write_graph, NodeKind};

    fn counter() -> SignalGraph {
        let mut g = SignalGraph::new();
        g.add_decl_node("cnt.en", NodeKind::Input, Some(1), None);
        g.add_decl_node("cnt.Plus1", NodeKind::Operator, None, None);
        g.add_decl_node("cnt.And2", NodeKind::Operator, None, None);
        g.add_decl_node("cnt.q", NodeKind::Reg, Some(4), None);
        g.add_decl_node("cnt.out", NodeKind::Output, Some(4), None);
        g.add_edge("cnt.q", "cnt.Plus1");
        g.add_edge("cnt.Plus1", "cnt.And2");
        g.add_edge("cnt.en", "cnt.And2");
        g.add_edge("cnt.And2", "cnt.q");
        g.add_edge("cnt.q", "cnt.out");
        g
    }

    #[test]
    fn writes_area_vector() {
        let dir = tempfile::tempdir().unwrap();
        let key = DesignKey::new("cnt", "sog");
        write_graph(dir.path(), &key, &counter()).unwrap();
        let sink = DiagnosticSink::new();

        let f = run_area(dir.path(), dir.path(), &key, &TechLibrary::default(), &sink).unwrap();
        assert_eq!(f.seq_bits, 4);
        assert_eq!(f.io_bits, 5);
        assert_eq!(f.and_count, 1);
        assert_eq!(f.fanout_sum, 1);

        let v = read_vector(&dir.path().join("cnt_sog_vec_area.json")).unwrap();
        assert_eq!(v, f.to_vec());

        let diags = sink.take_all();
        assert_eq!(diags[0].code.to_string(), "G001");
        assert!(diags[0].message.contains("inferred 2 width(s)"));
        assert_eq!(diags[1].code.to_string(), "A001");
        assert_eq!(diags[1].subject.as_deref(), Some("cnt_sog"));
        assert!(diags[1].message.starts_with(&format!("area {} ", f.total_area)));
    }

    #[test]
    fn stalled_inference_names_design() {
        let dir = tempfile::tempdir().unwrap();
        let key = DesignKey::new("cnt", "sog");
        let mut g = counter();
        g.add_decl_node("cnt.Xor9", NodeKind::Operator, None, None);
        g.add_edge("cnt.Xor9", "cnt.nowhere");
        write_graph(dir.path(), &key, &g).unwrap();

        let err = run_area(
            dir.path(),
            dir.path(),
            &key,
            &TechLibrary::default(),
            &DiagnosticSink::new(),
        )
        .unwrap_err();
        assert_eq!(err.design, "cnt");
        assert!(matches!(err.kind, FlowErrorKind::Graph(_)));
    }
}
