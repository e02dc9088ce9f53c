//! Error types for graph loading and width inference.

use std::path::PathBuf;

/// Errors raised while loading or completing a signal graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A full pass over the unresolved set resolved no width.
    #[error(
        "width inference stalled after {passes} pass(es): {} node(s) unresolved (first: '{}')",
        .unresolved.len(),
        .unresolved.first().map(String::as_str).unwrap_or("")
    )]
    WidthInferenceStalled {
        /// Nodes still lacking a width, in evaluation order.
        unresolved: Vec<String>,
        /// Number of passes run, including the stalled one.
        passes: usize,
    },

    /// An artifact file could not be read or written.
    #[error("graph artifact I/O error at {path}: {source}")]
    Io {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A graph payload could not be encoded or decoded.
    #[error("graph serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },

    /// An artifact file has a bad header or a corrupted payload.
    #[error("invalid graph artifact {path}: {reason}")]
    InvalidArtifact {
        /// The artifact path.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}
