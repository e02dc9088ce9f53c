//! The signal graph container.
//!
//! Signal flows from each adjacency key to every name in its fanout list.
//! Fanout lists keep insertion order and may contain names that have no
//! registry entry; producers own the consistency of the two halves.

use crate::node::{Node, NodeKind};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Node registry plus directed fanout lists for one design.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalGraph {
    adjacency: BTreeMap<String, Vec<String>>,
    registry: BTreeMap<String, Node>,
}

impl SignalGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a pre-built adjacency structure and node registry.
    ///
    /// No edge validation is performed.
    pub fn from_parts(
        adjacency: BTreeMap<String, Vec<String>>,
        registry: BTreeMap<String, Node>,
    ) -> Self {
        Self {
            adjacency,
            registry,
        }
    }

    /// Splits the graph back into adjacency and registry.
    pub fn into_parts(self) -> (BTreeMap<String, Vec<String>>, BTreeMap<String, Node>) {
        (self.adjacency, self.registry)
    }

    /// Registers a node, replacing any node with the same name.
    pub fn insert_node(&mut self, node: Node) {
        self.registry.insert(node.name.clone(), node);
    }

    /// Registers a declared signal.
    pub fn add_decl_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        width: Option<u32>,
        father: Option<&str>,
    ) {
        let mut node = Node::new(name, kind);
        node.width = width;
        node.father = father.map(str::to_string);
        self.insert_node(node);
    }

    /// Appends `v` to the fanout list of `u`, creating the list if needed.
    pub fn add_edge(&mut self, u: impl Into<String>, v: impl Into<String>) {
        self.adjacency.entry(u.into()).or_default().push(v.into());
    }

    /// Returns the fanout list of `u`; empty if `u` has no outgoing edges.
    pub fn get_neighbors(&self, u: &str) -> &[String] {
        self.adjacency.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes the adjacency entry of `u`, leaving the registry untouched.
    ///
    /// Returns the removed fanout list.
    pub fn remove_node(&mut self, u: &str) -> Option<Vec<String>> {
        self.adjacency.remove(u)
    }

    /// Looks up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.registry.get(name)
    }

    /// Looks up a node by name for mutation.
    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.registry.get_mut(name)
    }

    /// Iterates over registered nodes in name order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.registry.values()
    }

    /// The node registry.
    pub fn registry(&self) -> &BTreeMap<String, Node> {
        &self.registry
    }

    /// The adjacency structure.
    pub fn adjacency(&self) -> &BTreeMap<String, Vec<String>> {
        &self.adjacency
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of listed edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Every name that appears in the adjacency structure, as a key or a fanout.
    pub fn all_signals(&self) -> BTreeSet<&str> {
        let mut all = BTreeSet::new();
        for (key, fanout) in &self.adjacency {
            all.insert(key.as_str());
            all.extend(fanout.iter().map(String::as_str));
        }
        all
    }

    /// Number of distinct predecessors of every name with at least one.
    pub fn fanin_counts(&self) -> HashMap<&str, usize> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (u, fanout) in &self.adjacency {
            for v in fanout {
                if seen.insert((u.as_str(), v.as_str())) {
                    *counts.entry(v.as_str()).or_default() += 1;
                }
            }
        }
        counts
    }

    /// Resolves the enclosing signal of `name`.
    ///
    /// Returns `None` when the node is unknown, has no father, or names a
    /// father that is not registered.
    pub fn father(&self, name: &str) -> Option<&Node> {
        let father = self.registry.get(name)?.father.as_deref()?;
        self.registry.get(father)
    }

    /// Kind that decides whether `name` launches or captures timing paths.
    ///
    /// A bit slice stands for its father, so a slice of a register is a
    /// register boundary. A slice without a registered father keeps its own
    /// kind. `None` for unregistered names.
    pub fn timing_kind(&self, name: &str) -> Option<NodeKind> {
        let node = self.registry.get(name)?;
        match self.father(name) {
            Some(father) if node.kind.is_slice() => Some(father.kind),
            _ => Some(node.kind),
        }
    }

    /// Total register bits, from the registry alone.
    pub fn sequential_bits(&self) -> u64 {
        self.bits_where(|kind| kind == NodeKind::Reg)
    }

    /// Register plus combinational operator bits, from the registry alone.
    pub fn logic_bits(&self) -> u64 {
        self.bits_where(|kind| kind == NodeKind::Reg || kind.is_combinational())
    }

    fn bits_where(&self, pred: impl Fn(NodeKind) -> bool) -> u64 {
        self.registry
            .values()
            .filter(|n| pred(n.kind))
            .map(|n| u64::from(n.width.unwrap_or(0)))
            .sum()
    }
}
