//! Shared foundational types for RTL power/performance/area estimation.
//!
//! This crate provides the clock [`Frequency`] type, payload [`ContentHash`]es
//! for persisted graph artifacts, the [`DesignKey`] that names every per-design
//! file, and the closed set of combinational [`Operator`] kinds recognized by
//! the cost and delay models.

#![warn(missing_docs)]

pub mod design;
pub mod frequency;
pub mod hash;
pub mod operator;

pub use design::DesignKey;
pub use frequency::{Frequency, ParseFrequencyError};
pub use hash::ContentHash;
pub use operator::{GateFamily, Operator, UnknownOperator};
