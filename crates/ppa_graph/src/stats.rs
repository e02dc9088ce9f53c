//! Signal classification, graph statistics and DOT export.

use crate::graph::SignalGraph;
use crate::node::NodeKind;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Coarse class of a signal, used for statistics and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalClass {
    /// A register or a slice of one.
    Sequential,
    /// A declared wire.
    Wire,
    /// Combinational logic.
    Combinational,
    /// A primary input.
    Input,
    /// A primary output.
    Output,
    /// A literal constant.
    Constant,
    /// Unregistered or otherwise unclassified.
    Other,
}

impl SignalClass {
    fn dot_color(self) -> Option<&'static str> {
        match self {
            SignalClass::Sequential => Some("lightblue"),
            SignalClass::Wire => Some("red"),
            SignalClass::Input => Some("black"),
            SignalClass::Output => Some("green"),
            SignalClass::Constant => Some("grey"),
            SignalClass::Combinational => Some("pink"),
            SignalClass::Other => None,
        }
    }
}

/// Classifies `name`, letting a bit slice inherit the class of its father.
///
/// A node is sequential when it or its father is a register. The father is
/// likewise consulted for wires and ports; a dangling father counts as no
/// father at all.
pub fn classify(graph: &SignalGraph, name: &str) -> SignalClass {
    let Some(node) = graph.node(name) else {
        return SignalClass::Other;
    };
    let father = graph.father(name).map(|f| f.kind);
    let is = |kind: NodeKind| node.kind == kind || father == Some(kind);

    if is(NodeKind::Reg) {
        SignalClass::Sequential
    } else if is(NodeKind::Wire) {
        SignalClass::Wire
    } else if is(NodeKind::Input) {
        SignalClass::Input
    } else if is(NodeKind::Output) {
        SignalClass::Output
    } else if node.kind == NodeKind::Constant {
        SignalClass::Constant
    } else if node.kind.is_combinational() {
        SignalClass::Combinational
    } else {
        SignalClass::Other
    }
}

/// Per-class node counts over every signal named in the adjacency structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Distinct signal names in the adjacency structure.
    pub signals: usize,
    /// Registered nodes.
    pub registered: usize,
    /// Listed edges.
    pub edges: usize,
    /// Sequential signals.
    pub sequential: usize,
    /// Wires.
    pub wires: usize,
    /// Combinational signals.
    pub combinational: usize,
    /// Inputs.
    pub inputs: usize,
    /// Outputs.
    pub outputs: usize,
    /// Constants.
    pub constants: usize,
    /// Unclassified signals.
    pub other: usize,
}

impl GraphStats {
    /// Counts every signal of `graph` by class.
    pub fn collect(graph: &SignalGraph) -> Self {
        let signals = graph.all_signals();
        let mut stats = GraphStats {
            signals: signals.len(),
            registered: graph.node_count(),
            edges: graph.edge_count(),
            ..GraphStats::default()
        };
        for name in signals {
            let slot = match classify(graph, name) {
                SignalClass::Sequential => &mut stats.sequential,
                SignalClass::Wire => &mut stats.wires,
                SignalClass::Combinational => &mut stats.combinational,
                SignalClass::Input => &mut stats.inputs,
                SignalClass::Output => &mut stats.outputs,
                SignalClass::Constant => &mut stats.constants,
                SignalClass::Other => &mut stats.other,
            };
            *slot += 1;
        }
        stats
    }
}

fn dot_id(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '[' | ']' | '\\' => '_',
            c => c,
        })
        .collect()
}

/// Renders the graph as a Graphviz digraph named `top`.
///
/// Node names are sanitised for DOT, nodes are coloured by [`SignalClass`]
/// and duplicate edges are emitted once.
pub fn to_dot(graph: &SignalGraph, top: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {} {{", dot_id(top));

    for name in graph.all_signals() {
        let id = dot_id(name);
        match classify(graph, name).dot_color() {
            Some(color) => {
                let _ = writeln!(out, "    \"{id}\" [style=filled, fillcolor={color}];");
            }
            None => {
                let _ = writeln!(out, "    \"{id}\";");
            }
        }
    }

    let edges: BTreeSet<(String, String)> = graph
        .adjacency()
        .iter()
        .flat_map(|(u, fanout)| fanout.iter().map(move |v| (dot_id(u), dot_id(v))))
        .collect();
    for (u, v) in edges {
        let _ = writeln!(out, "    \"{u}\" -> \"{v}\";");
    }

    out.push_str("}\n");
    out
}
