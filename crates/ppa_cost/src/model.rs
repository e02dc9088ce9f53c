//! The node cost model.

use ppa_common::GateFamily;
use ppa_config::TechLibrary;
use ppa_graph::{Node, NodeKind, SignalGraph};

use crate::error::CostError;
use crate::features::AreaFeatures;
use crate::mnemonic::parse_operator;

/// Accumulates area and power over a graph using one technology library.
pub struct CostModel<'a> {
    library: &'a TechLibrary,
}

#[derive(Default)]
struct Accumulator {
    features: AreaFeatures,
    seq_area: f64,
    comb_area: f64,
    static_power: f64,
    dynamic_power: f64,
}

fn known_width(node: &Node) -> Result<u64, CostError> {
    node.known_width()
        .map(u64::from)
        .ok_or_else(|| CostError::MissingWidth {
            node: node.name.clone(),
        })
}

impl<'a> CostModel<'a> {
    /// Creates a cost model over `library`.
    pub fn new(library: &'a TechLibrary) -> Self {
        Self { library }
    }

    /// Costs every registered node that appears in the adjacency structure.
    ///
    /// Registers add their width to the sequential bit count, their distinct
    /// fan-in to the fanout sum and width-scaled flip-flop coefficients to
    /// area and power. Combinational nodes are costed by the operator lexed
    /// from their name. Ports count I/O bits only; the remaining kinds cost
    /// nothing. Sub-totals are rounded half-to-even before the totals are
    /// formed.
    pub fn evaluate(&self, graph: &SignalGraph) -> Result<AreaFeatures, CostError> {
        let signals = graph.all_signals();
        let fanin = graph.fanin_counts();
        let mut acc = Accumulator::default();

        for node in graph.nodes().filter(|n| signals.contains(n.name.as_str())) {
            match node.kind {
                NodeKind::Reg => {
                    let width = known_width(node)?;
                    let dff = &self.library.sequential;
                    let w = width as f64;
                    acc.features.seq_bits += width;
                    acc.features.fanout_sum +=
                        fanin.get(node.name.as_str()).copied().unwrap_or(0) as u64;
                    acc.seq_area += dff.area * w;
                    acc.static_power += dff.static_power * w;
                    acc.dynamic_power += dff.dynamic_power * w;
                }
                NodeKind::Operator
                | NodeKind::UnaryOperator
                | NodeKind::Concat
                | NodeKind::Repeat => {
                    let width = known_width(node)?;
                    let op = parse_operator(&node.name)?;
                    let coeffs =
                        self.library
                            .operator(op)
                            .ok_or_else(|| CostError::UnknownOperator {
                                node: node.name.clone(),
                                mnemonic: op.mnemonic().to_string(),
                            })?;
                    let w = width as f64;
                    acc.features.comb_bits += width;
                    acc.comb_area += coeffs.area * w;
                    acc.static_power += coeffs.static_power * w;
                    acc.dynamic_power += coeffs.dynamic_power * w;

                    let counter = match op.gate_family() {
                        Some(GateFamily::And) => &mut acc.features.and_count,
                        Some(GateFamily::Or) => &mut acc.features.or_count,
                        Some(GateFamily::Not) => &mut acc.features.not_count,
                        Some(GateFamily::Xor) => &mut acc.features.xor_count,
                        Some(GateFamily::Mux) => &mut acc.features.mux_count,
                        None => continue,
                    };
                    *counter += 1;
                }
                NodeKind::Input | NodeKind::Output | NodeKind::Inout => {
                    acc.features.io_bits += known_width(node)?;
                }
                NodeKind::Constant | NodeKind::Wire | NodeKind::Partselect | NodeKind::Pointer => {}
            }
        }

        Ok(acc.finish())
    }
}

impl Accumulator {
    fn finish(self) -> AreaFeatures {
        let seq_area = self.seq_area.round_ties_even();
        let comb_area = self.comb_area.round_ties_even();
        let static_power = self.static_power.round_ties_even();
        let dynamic_power = self.dynamic_power.round_ties_even();
        AreaFeatures {
            seq_area,
            comb_area,
            total_area: seq_area + comb_area,
            static_power,
            dynamic_power,
            total_power: static_power + dynamic_power,
            ..self.features
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppa_config::CellCoefficients;
    use std::collections::BTreeMap;

    fn single_register() -> SignalGraph {
        let mut registry = BTreeMap::new();
        registry.insert("q".to_string(), Node::new("q", NodeKind::Reg).with_width(8));
        let mut adjacency = BTreeMap::new();
        adjacency.insert("q".to_string(), Vec::new());
        SignalGraph::from_parts(adjacency, registry)
    }

    #[test]
    fn single_register_is_eight_dffs() {
        let lib = TechLibrary::default();
        let f = CostModel::new(&lib).evaluate(&single_register()).unwrap();
        assert_eq!(f.seq_bits, 8);
        assert_eq!(f.comb_bits, 0);
        assert_eq!(f.io_bits, 0);
        assert_eq!(f.fanout_sum, 0);
        assert_eq!(f.seq_area, 36.0);
        assert_eq!(f.comb_area, 0.0);
        assert_eq!(f.total_area, 36.0);
        assert_eq!(f.static_power, 1.0);
        assert_eq!(f.dynamic_power, 25.0);
        assert_eq!(f.total_power, 26.0);
    }

    #[test]
    fn nodes_outside_adjacency_are_ignored() {
        let mut g = single_register();
        g.add_decl_node("floating", NodeKind::Reg, Some(64), None);
        let lib = TechLibrary::default();
        let f = CostModel::new(&lib).evaluate(&g).unwrap();
        assert_eq!(f.seq_bits, 8);
    }

    fn mixed() -> SignalGraph {
        let mut g = SignalGraph::new();
        g.add_decl_node("a", NodeKind::Input, Some(4), None);
        g.add_decl_node("b", NodeKind::Input, Some(4), None);
        g.add_decl_node("And1", NodeKind::Operator, Some(4), None);
        g.add_decl_node("Unot2", NodeKind::UnaryOperator, Some(4), None);
        g.add_decl_node("Cond3", NodeKind::Operator, Some(4), None);
        g.add_decl_node("Plus4", NodeKind::Operator, Some(4), None);
        g.add_decl_node("k", NodeKind::Constant, Some(4), None);
        g.add_decl_node("r", NodeKind::Reg, Some(4), None);
        g.add_decl_node("y", NodeKind::Output, Some(4), None);
        g.add_edge("a", "And1");
        g.add_edge("b", "And1");
        g.add_edge("And1", "Unot2");
        g.add_edge("Unot2", "Cond3");
        g.add_edge("k", "Cond3");
        g.add_edge("Cond3", "r");
        g.add_edge("Plus4", "r");
        g.add_edge("Plus4", "r");
        g.add_edge("r", "Plus4");
        g.add_edge("r", "y");
        g
    }

    #[test]
    fn mixed_design_counts() {
        let lib = TechLibrary::default();
        let f = CostModel::new(&lib).evaluate(&mixed()).unwrap();
        assert_eq!(f.seq_bits, 4);
        assert_eq!(f.fanout_sum, 2);
        assert_eq!(f.io_bits, 12);
        assert_eq!(f.comb_bits, 16);
        assert_eq!(
            (f.and_count, f.or_count, f.not_count, f.xor_count, f.mux_count),
            (1, 0, 1, 0, 1)
        );
        // 4 * (1.064 + 0.798 + 1.862 + 4.256) = 31.92
        assert_eq!(f.comb_area, 32.0);
        assert_eq!(f.total_area, f.seq_area + f.comb_area);
    }

    #[test]
    fn injected_library_is_used() {
        let mut lib = TechLibrary::default();
        lib.sequential = CellCoefficients::new(1.0, 0.0, 0.0);
        let f = CostModel::new(&lib).evaluate(&single_register()).unwrap();
        assert_eq!(f.seq_area, 8.0);
        assert_eq!(f.total_power, 0.0);
    }

    #[test]
    fn half_rounds_to_even() {
        let mut lib = TechLibrary::default();
        lib.sequential = CellCoefficients::new(0.3125, 0.0, 0.0);
        // 8 * 0.3125 = 2.5
        let f = CostModel::new(&lib).evaluate(&single_register()).unwrap();
        assert_eq!(f.seq_area, 2.0);
    }

    #[test]
    fn missing_width_is_fatal() {
        let mut g = mixed();
        g.node_mut("Plus4").unwrap().width = None;
        let lib = TechLibrary::default();
        let err = CostModel::new(&lib).evaluate(&g).unwrap_err();
        assert_eq!(err, CostError::MissingWidth { node: "Plus4".to_string() });
    }

    #[test]
    fn unknown_mnemonic_is_fatal() {
        let mut g = mixed();
        g.add_decl_node("Nand9", NodeKind::Operator, Some(1), None);
        g.add_edge("Nand9", "r");
        let lib = TechLibrary::default();
        let err = CostModel::new(&lib).evaluate(&g).unwrap_err();
        assert!(matches!(err, CostError::UnknownOperator { ref mnemonic, .. } if mnemonic == "Nand"));
    }

    #[test]
    fn operator_missing_from_library_is_fatal() {
        let mut lib = TechLibrary::default();
        lib.operators.remove(&ppa_common::Operator::Plus);
        let err = CostModel::new(&lib).evaluate(&mixed()).unwrap_err();
        assert!(matches!(err, CostError::UnknownOperator { ref node, .. } if node == "Plus4"));
    }
}
