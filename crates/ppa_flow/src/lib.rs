//! Per-design analysis drivers.
//!
//! Each driver loads one design's artifacts, runs one analysis end to end
//! and writes its feature vector as a JSON array next to the others:
//!
//! | driver              | reads                                   | writes                      |
//! |---------------------|-----------------------------------------|-----------------------------|
//! | [`run_area`]        | graph artifacts                         | `{stem}_vec_area.json`      |
//! | [`run_timing`]      | graph artifacts, a delay oracle         | `{stem}_vec_timing.json`    |
//! | [`run_power`]       | area vector, toggle-rate scalars        | `{stem}_vec_pwr.json`       |
//! | [`run_calibration`] | registry, predicted slacks, opt. report | `{design}_rf.json`, `{design}_rf_mul.json` |
//! | [`run_stats`]       | graph artifacts                         | optional `{stem}.dot`       |
//!
//! Designs are independent: every driver owns its graph and scratch state
//! and a failure is returned as a [`FlowError`] naming the design.

#![warn(missing_docs)]

pub mod area;
pub mod calibrate;
pub mod error;
pub mod power;
pub mod stats;
pub mod timing;
pub mod vectors;

pub use area::run_area;
pub use calibrate::{run_calibration, CalibrationDirs, CalibrationOutcome};
pub use error::{FlowError, FlowErrorKind};
pub use power::run_power;
pub use stats::run_stats;
pub use timing::{run_timing, TimingOutcome};
