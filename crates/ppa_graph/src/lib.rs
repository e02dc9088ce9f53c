//! Bit-level signal graph of an RTL design.
//!
//! The [`SignalGraph`] pairs a node registry (name → [`Node`]) with directed
//! fanout lists. It is loaded once per design from persisted
//! [`artifact`]s, completed by [`width::infer_widths`], and then read by the
//! cost model and the timing engine.
//!
//! # Architecture
//!
//! - [`node`]: node attributes and the closed [`NodeKind`] set
//! - [`graph`]: adjacency + registry container
//! - [`width`]: fixed-point bit-width inference with a stall guard
//! - [`stats`]: signal classification, design statistics, Graphviz export
//! - [`ids`]: interned dense [`NodeId`]s for per-analysis side tables
//! - [`artifact`]: checksummed binary persistence of a graph

#![warn(missing_docs)]

pub mod artifact;
pub mod error;
pub mod graph;
pub mod ids;
pub mod node;
pub mod stats;
pub mod width;

pub use artifact::{read_graph, read_registry, write_graph};
pub use error::GraphError;
pub use graph::SignalGraph;
pub use ids::{NodeId, NodeIndex};
pub use node::{Node, NodeKind};
pub use stats::{classify, to_dot, GraphStats, SignalClass};
pub use width::{infer_widths, WidthReport};
