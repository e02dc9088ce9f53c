//! Timing and calibration errors.

use std::path::PathBuf;

/// Errors that abort timing extraction for a design.
#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    /// A traversed or annotated signal has no registry entry.
    #[error("signal '{node}' is not in the node registry")]
    UnknownNode {
        /// The unregistered name.
        node: String,
    },

    /// The delay oracle produced no estimate for a node.
    #[error("no delay estimate for node '{node}'")]
    MissingDelay {
        /// The node lacking a delay.
        node: String,
    },

    /// The delay oracle produced a negative or non-finite estimate.
    #[error("malformed delay estimate {value} for node '{node}'")]
    MalformedDelay {
        /// The node with the bad estimate.
        node: String,
        /// The rejected value.
        value: f64,
    },

    /// A delay table or reference report could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A precomputed delay table is not a JSON object of numbers.
    #[error("invalid delay table: {reason}")]
    InvalidDelayTable {
        /// Description of the failure.
        reason: String,
    },
}

/// Errors raised by slack calibration and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// There are no samples to calibrate or validate against.
    #[error("empty {what} population")]
    EmptyPopulation {
        /// Which population was empty.
        what: &'static str,
    },

    /// A sample is NaN or infinite.
    #[error("non-finite {what} sample {value} at index {index}")]
    NonFinite {
        /// Which population held the sample.
        what: &'static str,
        /// Position of the sample.
        index: usize,
        /// The sample.
        value: f64,
    },
}
