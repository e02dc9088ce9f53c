//! Critical-path timing, slack aggregation and slack calibration.
//!
//! The pipeline for one design:
//!
//! 1. [`oracle`]: a [`DelayOracle`] estimates a delay for every node and
//!    [`annotate_delays`] stores it on the graph.
//! 2. [`sta`]: longest-path relaxation from every startpoint yields one
//!    [`TimingPath`] per reachable endpoint.
//! 3. [`slack`]: the [`SlackCalculator`] turns path delays into clamped
//!    slacks per [`PathBoundary`] and aggregates `[WNS, TNS]`.
//! 4. [`calibration`]: a population of predicted path slacks is reduced to
//!    a single calibrated WNS by a scale-dependent percentile, optionally
//!    validated against slacks parsed by [`report`] from a reference timing
//!    report.
//!
//! Every stage owns its scratch state; nothing is cached across designs.

#![warn(missing_docs)]

pub mod calibration;
pub mod error;
pub mod oracle;
pub mod report;
pub mod slack;
pub mod sta;

pub use calibration::{
    calibrate, percentile_index, sample_size, Calibration, Percentile, ValidationRecord,
    ValidationSummary,
};
pub use error::{CalibrationError, TimingError};
pub use oracle::{annotate_delays, DelayOracle, LibraryDelayOracle, PrecomputedDelays};
pub use report::{parse_reference_report, parse_slack_line, read_reference_report};
pub use slack::{PathBoundary, SlackCalculator, TimingSummary};
pub use sta::{analyze_paths, StaResult, TimingPath, TraversalContext};
