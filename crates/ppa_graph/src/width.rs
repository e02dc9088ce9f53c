//! Fixed-point bit-width inference.
//!
//! Operator and intermediate nodes are usually created without a width. A
//! node's width is the maximum width among its immediate fanout, so widths
//! flow backward from declared sinks until every node is resolved.

use crate::error::GraphError;
use crate::graph::SignalGraph;

/// Outcome of a successful inference run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthReport {
    /// Number of nodes that received an inferred width.
    pub inferred: usize,
    /// Number of passes over the unresolved set.
    pub passes: usize,
}

/// Fills in the width of every registered node whose width is unset or zero.
///
/// Each pass visits every unresolved node. A node with outgoing edges whose
/// fanout are all registered with a known width takes their maximum width
/// and leaves the unresolved set; otherwise it waits for a later pass. Widths
/// assigned during a pass are visible to the rest of that pass.
///
/// Fails with [`GraphError::WidthInferenceStalled`] when a full pass resolves
/// nothing, which happens for unresolved nodes without fanout, fanout missing
/// from the registry, or a cycle of unresolved nodes. On an already resolved
/// graph this is a no-op reporting zero passes.
pub fn infer_widths(graph: &mut SignalGraph) -> Result<WidthReport, GraphError> {
    let unresolved = graph
        .nodes()
        .filter(|n| n.known_width().is_none())
        .map(|n| n.name.clone())
        .collect();
    resolve(graph, unresolved)
}

fn resolve(graph: &mut SignalGraph, mut unresolved: Vec<String>) -> Result<WidthReport, GraphError> {
    let mut report = WidthReport {
        inferred: 0,
        passes: 0,
    };

    while !unresolved.is_empty() {
        report.passes += 1;
        let before = unresolved.len();
        let mut pending = Vec::with_capacity(before);

        for name in unresolved.drain(..) {
            match max_fanout_width(graph, &name) {
                Some(width) => {
                    if let Some(node) = graph.node_mut(&name) {
                        node.width = Some(width);
                    }
                    report.inferred += 1;
                }
                None => pending.push(name),
            }
        }

        if pending.len() == before {
            return Err(GraphError::WidthInferenceStalled {
                unresolved: pending,
                passes: report.passes,
            });
        }
        unresolved = pending;
    }

    Ok(report)
}

/// Maximum known width among the fanout of `name`, or `None` if the node has
/// no fanout or any fanout is unregistered or still unresolved.
fn max_fanout_width(graph: &SignalGraph, name: &str) -> Option<u32> {
    let fanout = graph.get_neighbors(name);
    if fanout.is_empty() {
        return None;
    }
    fanout
        .iter()
        .map(|f| graph.node(f).and_then(|n| n.known_width()))
        .try_fold(0u32, |max, w| w.map(|w| max.max(w)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// in(4) -> Plus1 -> Xor2 -> q(8); Plus1 -> Concat3 -> out(16); Xor2 -> out
    fn adder_graph() -> SignalGraph {
        let mut g = SignalGraph::new();
        g.add_decl_node("in", NodeKind::Input, Some(4), None);
        g.add_decl_node("Plus1", NodeKind::Operator, None, None);
        g.add_decl_node("Xor2", NodeKind::Operator, None, None);
        g.add_decl_node("Concat3", NodeKind::Concat, Some(0), None);
        g.add_decl_node("q", NodeKind::Reg, Some(8), None);
        g.add_decl_node("out", NodeKind::Output, Some(16), None);
        g.add_edge("in", "Plus1");
        g.add_edge("Plus1", "Xor2");
        g.add_edge("Plus1", "Concat3");
        g.add_edge("Xor2", "q");
        g.add_edge("Xor2", "out");
        g.add_edge("Concat3", "out");
        g
    }

    fn width(g: &SignalGraph, name: &str) -> Option<u32> {
        g.node(name).and_then(|n| n.width)
    }

    #[test]
    fn resolves_from_sinks() {
        let mut g = adder_graph();
        let report = infer_widths(&mut g).unwrap();
        assert_eq!(report.inferred, 3);
        assert_eq!(width(&g, "Xor2"), Some(16));
        assert_eq!(width(&g, "Concat3"), Some(16));
        assert_eq!(width(&g, "Plus1"), Some(16));
        assert_eq!(width(&g, "in"), Some(4));
    }

    #[test]
    fn resolved_graph_is_noop() {
        let mut g = adder_graph();
        infer_widths(&mut g).unwrap();
        let snapshot = g.clone();
        let report = infer_widths(&mut g).unwrap();
        assert_eq!(report, WidthReport { inferred: 0, passes: 0 });
        assert_eq!(g, snapshot);
    }

    #[test]
    fn order_independent() {
        let mut reference = adder_graph();
        infer_widths(&mut reference).unwrap();

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..16 {
            let mut g = adder_graph();
            let mut order = vec![
                "Plus1".to_string(),
                "Xor2".to_string(),
                "Concat3".to_string(),
            ];
            order.shuffle(&mut rng);
            resolve(&mut g, order).unwrap();
            assert_eq!(g, reference);
        }
    }

    #[test]
    fn chain_needs_several_passes_in_reverse_order() {
        let mut g = SignalGraph::new();
        for name in ["a", "b", "c"] {
            g.add_decl_node(name, NodeKind::Wire, None, None);
        }
        g.add_decl_node("q", NodeKind::Reg, Some(2), None);
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "q");
        let report = infer_widths(&mut g).unwrap();
        assert_eq!(report.inferred, 3);
        assert_eq!(report.passes, 3);
        assert_eq!(width(&g, "a"), Some(2));
    }

    #[test]
    fn node_without_fanout_stalls() {
        let mut g = adder_graph();
        g.add_decl_node("dangling", NodeKind::Wire, None, None);
        let err = infer_widths(&mut g).unwrap_err();
        match err {
            GraphError::WidthInferenceStalled { unresolved, passes } => {
                assert_eq!(unresolved, vec!["dangling".to_string()]);
                assert!(passes >= 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unregistered_fanout_stalls() {
        let mut g = SignalGraph::new();
        g.add_decl_node("Unot1", NodeKind::UnaryOperator, None, None);
        g.add_edge("Unot1", "ghost");
        let err = infer_widths(&mut g).unwrap_err();
        assert!(matches!(
            err,
            GraphError::WidthInferenceStalled { passes: 1, .. }
        ));
    }

    #[test]
    fn unresolved_cycle_stalls() {
        let mut g = SignalGraph::new();
        g.add_decl_node("x", NodeKind::Wire, None, None);
        g.add_decl_node("y", NodeKind::Wire, None, None);
        g.add_edge("x", "y");
        g.add_edge("y", "x");
        assert!(infer_widths(&mut g).is_err());
    }
}
