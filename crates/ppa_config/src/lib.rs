//! Technology-library configuration for the cost, delay and slack models.
//!
//! A [`TechLibrary`] bundles the per-bit area/power coefficients, the timing
//! library (target clock, uncertainty, setup, I/O delays, gate delays) and the
//! slack calibration policy. It is an immutable value handed to each model at
//! construction; [`TechLibrary::default`] carries the built-in tables and a
//! TOML file can overlay any subset of them.

#![warn(missing_docs)]

pub mod defaults;
pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_library, load_library_from_str};
pub use types::*;
