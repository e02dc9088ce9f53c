//! Structured diagnostics for design analysis runs.
//!
//! Analyses never print. Non-fatal conditions (an unparseable reference-report
//! line, an unmet timing target) and operational notes (STA runtime, the
//! calibrated estimate) are recorded as [`Diagnostic`]s in a [`DiagnosticSink`]
//! owned by the caller for the duration of one design.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
