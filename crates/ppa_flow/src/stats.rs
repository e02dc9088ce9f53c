//! Design statistics and Graphviz export.

use ppa_common::DesignKey;
use ppa_diagnostics::DiagnosticSink;
use ppa_graph::{read_graph, to_dot, GraphStats};
use std::path::Path;

use crate::area::resolve_widths;
use crate::error::{FlowError, FlowErrorKind, InDesign};

/// Loads the graph of `key`, completes its widths and counts its signals.
///
/// With `dot_dir` set, also writes `{stem}.dot` there.
pub fn run_stats(
    graph_dir: &Path,
    dot_dir: Option<&Path>,
    key: &DesignKey,
    sink: &DiagnosticSink,
) -> Result<GraphStats, FlowError> {
    let mut graph = read_graph(graph_dir, key).in_design(&key.design)?;
    resolve_widths(&mut graph, key, sink)?;
    let stats = GraphStats::collect(&graph);

    if let Some(dir) = dot_dir {
        let path = dir.join(key.dot_file());
        std::fs::create_dir_all(dir)
            .and_then(|()| std::fs::write(&path, to_dot(&graph, &key.design)))
            .map_err(|e| FlowErrorKind::Io { path, source: e })
            .in_design(&key.design)?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppa_graph::{write_graph, NodeKind, SignalGraph};

    #[test]
    fn counts_and_renders() {
        let dir = tempfile::tempdir().unwrap();
        let key = DesignKey::new("top", "sog");
        let mut g = SignalGraph::new();
        g.add_decl_node("top.a", NodeKind::Input, Some(1), None);
        g.add_decl_node("top.Unot1", NodeKind::UnaryOperator, None, None);
        g.add_decl_node("top.r", NodeKind::Reg, Some(1), None);
        g.add_edge("top.a", "top.Unot1");
        g.add_edge("top.Unot1", "top.r");
        write_graph(dir.path(), &key, &g).unwrap();

        let stats = run_stats(dir.path(), Some(dir.path()), &key, &DiagnosticSink::new()).unwrap();
        assert_eq!(stats.signals, 3);
        assert_eq!(stats.inputs, 1);
        assert_eq!(stats.combinational, 1);
        assert_eq!(stats.sequential, 1);

        let dot = std::fs::read_to_string(dir.path().join("top_sog.dot")).unwrap();
        assert!(dot.contains("\"top_a\" -> \"top_Unot1\";"));
    }
}
