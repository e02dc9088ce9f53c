//! Flow errors with design context.

use ppa_cost::CostError;
use ppa_graph::GraphError;
use ppa_timing::{CalibrationError, TimingError};
use std::fmt;
use std::path::PathBuf;

/// What went wrong inside a driver.
#[derive(Debug, thiserror::Error)]
pub enum FlowErrorKind {
    /// Graph loading or width inference failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The cost model rejected the graph.
    #[error(transparent)]
    Cost(#[from] CostError),

    /// Delay annotation or timing analysis failed.
    #[error(transparent)]
    Timing(#[from] TimingError),

    /// Slack calibration failed.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// A vector file could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A vector file is not the expected JSON.
    #[error("invalid JSON in {path}: {reason}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A vector file has the wrong number of elements.
    #[error("{path} holds {found} value(s), expected {expected}")]
    VectorLength {
        /// The file involved.
        path: PathBuf,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
}

/// A driver failure for one design.
#[derive(Debug)]
pub struct FlowError {
    /// The design being analyzed.
    pub design: String,
    /// The underlying failure.
    pub kind: FlowErrorKind,
}

impl FlowError {
    /// Attaches `design` to `kind`.
    pub fn new(design: impl Into<String>, kind: impl Into<FlowErrorKind>) -> Self {
        Self {
            design: design.into(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "design '{}': {}", self.design, self.kind)
    }
}

impl std::error::Error for FlowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Tags an error result with the design it belongs to.
pub(crate) trait InDesign<T> {
    fn in_design(self, design: &str) -> Result<T, FlowError>;
}

impl<T, E: Into<FlowErrorKind>> InDesign<T> for Result<T, E> {
    fn in_design(self, design: &str) -> Result<T, FlowError> {
        self.map_err(|e| FlowError::new(design, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_design() {
        let err = FlowError::new(
            "uart",
            CostError::MissingWidth {
                node: "u0.And1".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "design 'uart': node 'u0.And1' has no width; run width inference first"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn in_design_wraps() {
        let result: Result<(), CalibrationError> =
            Err(CalibrationError::EmptyPopulation { what: "predicted slack" });
        let err = result.in_design("spi").unwrap_err();
        assert_eq!(err.design, "spi");
        assert!(matches!(err.kind, FlowErrorKind::Calibration(_)));
    }
}
