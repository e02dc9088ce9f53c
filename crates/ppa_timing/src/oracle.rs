//! Delay estimation.
//!
//! The timing engine never computes delays itself. A [`DelayOracle`] is
//! injected per design: a table lookup over the technology library, a map of
//! estimates produced offline by a regression model, or any closure.

use ppa_config::TimingLibrary;
use ppa_cost::parse_operator;
use ppa_graph::{Node, NodeKind, SignalGraph};
use std::collections::HashMap;
use std::path::Path;

use crate::error::TimingError;

/// Source of per-node propagation delays in nanoseconds.
pub trait DelayOracle {
    /// Returns the delay of `node`, or `None` if no estimate exists.
    fn estimate(&self, node: &Node) -> Option<f64>;
}

impl<F> DelayOracle for F
where
    F: Fn(&Node) -> Option<f64>,
{
    fn estimate(&self, node: &Node) -> Option<f64> {
        self(node)
    }
}

/// Delays looked up from the characterized gates of a [`TimingLibrary`].
///
/// Registers take the clock-to-Q delay and operators the gate delay of the
/// mnemonic in their name. Ports, wires, constants and selects are free.
/// Operators the library does not characterize have no estimate.
pub struct LibraryDelayOracle<'a> {
    timing: &'a TimingLibrary,
}

impl<'a> LibraryDelayOracle<'a> {
    /// Creates an oracle over `timing`.
    pub fn new(timing: &'a TimingLibrary) -> Self {
        Self { timing }
    }
}

impl DelayOracle for LibraryDelayOracle<'_> {
    fn estimate(&self, node: &Node) -> Option<f64> {
        match node.kind {
            NodeKind::Reg => Some(self.timing.register_delay_ns),
            NodeKind::Operator | NodeKind::UnaryOperator | NodeKind::Concat | NodeKind::Repeat => {
                let op = parse_operator(&node.name).ok()?;
                self.timing.gate_delay(op)
            }
            NodeKind::Input
            | NodeKind::Output
            | NodeKind::Inout
            | NodeKind::Wire
            | NodeKind::Constant
            | NodeKind::Partselect
            | NodeKind::Pointer => Some(0.0),
        }
    }
}

/// Delays keyed by node name, typically the output of a path-level model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedDelays {
    delays: HashMap<String, f64>,
}

impl PrecomputedDelays {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay of `name`.
    pub fn insert(&mut self, name: impl Into<String>, delay: f64) {
        self.delays.insert(name.into(), delay);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Parses a JSON object mapping node names to delays.
    pub fn from_json_str(text: &str) -> Result<Self, TimingError> {
        let delays: HashMap<String, f64> =
            serde_json::from_str(text).map_err(|e| TimingError::InvalidDelayTable {
                reason: e.to_string(),
            })?;
        Ok(Self { delays })
    }

    /// Loads a JSON delay table from `path`.
    pub fn load(path: &Path) -> Result<Self, TimingError> {
        let text = std::fs::read_to_string(path).map_err(|e| TimingError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&text)
    }
}

impl FromIterator<(String, f64)> for PrecomputedDelays {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            delays: iter.into_iter().collect(),
        }
    }
}

impl DelayOracle for PrecomputedDelays {
    fn estimate(&self, node: &Node) -> Option<f64> {
        self.delays.get(&node.name).copied()
    }
}

/// Stores an estimate on every signal of the graph.
///
/// Every name in the adjacency structure must be registered, and the oracle
/// must return a finite, non-negative delay for each. Returns the number of
/// annotated nodes. On error the graph may be partially annotated.
pub fn annotate_delays(
    graph: &mut SignalGraph,
    oracle: &dyn DelayOracle,
) -> Result<usize, TimingError> {
    let names: Vec<String> = graph.all_signals().into_iter().map(str::to_string).collect();
    for name in &names {
        let node = graph
            .node_mut(name)
            .ok_or_else(|| TimingError::UnknownNode { node: name.clone() })?;
        let delay = oracle
            .estimate(node)
            .ok_or_else(|| TimingError::MissingDelay { node: name.clone() })?;
        if !delay.is_finite() || delay < 0.0 {
            return Err(TimingError::MalformedDelay {
                node: name.clone(),
                value: delay,
            });
        }
        node.delay = Some(delay);
    }
    Ok(names.len())
}
