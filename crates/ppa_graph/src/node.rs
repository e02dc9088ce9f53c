//! Signal graph nodes.
//!
//! A [`Node`] is one bit-level signal or operator instance. Nodes are owned by
//! the graph registry and referenced everywhere else by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a signal graph node.
///
/// The set is closed: a registry naming any other kind fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Primary input port.
    Input,
    /// Primary output port.
    Output,
    /// Bidirectional port.
    Inout,
    /// Register (flip-flop) bit or vector.
    Reg,
    /// Declared wire.
    Wire,
    /// Literal constant.
    Constant,
    /// Binary operator instance; the mnemonic is embedded in the name.
    Operator,
    /// Unary operator instance.
    UnaryOperator,
    /// Concatenation.
    Concat,
    /// Replication.
    Repeat,
    /// Part select of a vector.
    Partselect,
    /// Indexed bit select.
    Pointer,
}

impl NodeKind {
    /// Returns `true` for logic that costs combinational area and power.
    pub fn is_combinational(self) -> bool {
        matches!(
            self,
            NodeKind::Operator | NodeKind::UnaryOperator | NodeKind::Concat | NodeKind::Repeat
        )
    }

    /// Returns `true` for bit selects of an enclosing signal.
    pub fn is_slice(self) -> bool {
        matches!(self, NodeKind::Partselect | NodeKind::Pointer)
    }

    /// Returns `true` if timing paths may start at this kind.
    pub fn launches_paths(self) -> bool {
        matches!(self, NodeKind::Reg | NodeKind::Input | NodeKind::Inout)
    }

    /// Returns `true` if timing paths end at this kind.
    pub fn captures_paths(self) -> bool {
        matches!(self, NodeKind::Reg | NodeKind::Output | NodeKind::Inout)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn default_steady_state_probability() -> f64 {
    0.5
}

/// A bit-level signal or operator instance.
///
/// `width` is `None` (or zero) until declared or inferred. `father` names the
/// enclosing multi-bit signal of a bit-sliced node; it is a registry key, not
/// an ownership link, and a dangling name means "no parent". `delay` is filled
/// in by the delay oracle; the toggle fields are populated by toggle-rate
/// propagation and default to "unknown" / 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique flattened identifier.
    pub name: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Bit width, if known.
    #[serde(default)]
    pub width: Option<u32>,
    /// Name of the enclosing multi-bit signal.
    #[serde(default)]
    pub father: Option<String>,
    /// Propagation delay in ns, once estimated.
    #[serde(default)]
    pub delay: Option<f64>,
    /// Toggle rate, once propagated.
    #[serde(default)]
    pub toggle_rate: Option<f64>,
    /// Probability of the signal being 1 in steady state.
    #[serde(default = "default_steady_state_probability")]
    pub steady_state_probability: f64,
}

impl Node {
    /// Creates a node with no width, father, delay or toggle data.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            width: None,
            father: None,
            delay: None,
            toggle_rate: None,
            steady_state_probability: default_steady_state_probability(),
        }
    }

    /// Sets the declared width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the enclosing signal name.
    pub fn with_father(mut self, father: impl Into<String>) -> Self {
        self.father = Some(father.into());
        self
    }

    /// Returns the width if it is known and non-zero.
    pub fn known_width(&self) -> Option<u32> {
        self.width.filter(|&w| w > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_unknown() {
        let node = Node::new("a", NodeKind::Wire).with_width(0);
        assert_eq!(node.known_width(), None);
        assert_eq!(Node::new("b", NodeKind::Wire).with_width(4).known_width(), Some(4));
    }

    #[test]
    fn kind_partitions() {
        assert!(NodeKind::Concat.is_combinational());
        assert!(NodeKind::Pointer.is_slice());
        assert!(!NodeKind::Reg.is_slice());
        assert!(NodeKind::Reg.launches_paths() && NodeKind::Reg.captures_paths());
        assert!(NodeKind::Input.launches_paths() && !NodeKind::Input.captures_paths());
        assert!(!NodeKind::Output.launches_paths() && NodeKind::Output.captures_paths());
    }

    #[test]
    fn json_defaults() {
        let node: Node = serde_json::from_str(r#"{"name": "q", "kind": "Reg"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Reg);
        assert_eq!(node.width, None);
        assert_eq!(node.steady_state_probability, 0.5);
    }

    #[test]
    fn unknown_kind_rejected() {
        let result = serde_json::from_str::<Node>(r#"{"name": "x", "kind": "Latch"}"#);
        assert!(result.is_err());
    }
}
