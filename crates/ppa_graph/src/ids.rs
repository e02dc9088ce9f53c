//! Dense integer handles for signal names.
//!
//! Traversals that touch every node many times work on [`NodeId`]s instead of
//! strings. A [`NodeIndex`] is built once per graph; ids are dense from zero,
//! so they can index flat per-node arrays directly.

use crate::graph::SignalGraph;
use lasso::ThreadedRodeo;

/// Interned handle to a signal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a handle from a raw value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns the handle as an array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// SAFETY: `into_usize` and `try_from_usize` round-trip every value that fits
// in a `u32`.
unsafe impl lasso::Key for NodeId {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(NodeId)
    }
}

/// Name-to-id mapping for every signal of one graph.
pub struct NodeIndex {
    rodeo: ThreadedRodeo<NodeId>,
}

impl NodeIndex {
    /// Interns every signal named in the adjacency structure or the registry.
    pub fn build(graph: &SignalGraph) -> Self {
        let rodeo = ThreadedRodeo::new();
        for name in graph.all_signals() {
            rodeo.get_or_intern(name);
        }
        for name in graph.registry().keys() {
            rodeo.get_or_intern(name.as_str());
        }
        Self { rodeo }
    }

    /// Returns the id of `name`, if it belongs to the graph.
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.rodeo.get(name)
    }

    /// Returns the name behind `id`.
    pub fn name(&self, id: NodeId) -> &str {
        self.rodeo.resolve(&id)
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns `true` if the graph had no signals.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}
