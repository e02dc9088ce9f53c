//! Error types for technology-library loading and validation.

/// Errors that can occur when loading or validating a technology library.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the library file.
    #[error("failed to read technology library: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse technology library: {0}")]
    ParseError(String),

    /// A coefficient or delay table names an operator outside the supported set.
    #[error("unknown operator '{0}' in technology library")]
    UnknownOperator(String),

    /// A library value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
