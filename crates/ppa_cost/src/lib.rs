//! Area and power estimation from a width-resolved signal graph.
//!
//! The [`CostModel`] walks every registered node that takes part in the
//! graph and accumulates per-bit coefficients from the injected
//! [`TechLibrary`](ppa_config::TechLibrary): flip-flops for registers and the
//! per-operator table for combinational logic. Operator kinds are recovered
//! from node names by the [`mnemonic`] lexer.
//!
//! The result is an [`AreaFeatures`] record whose fixed 14-element vector
//! form is the area interface of a design; [`PowerFeatures`] extends it with
//! toggle-rate statistics and a module-level power estimate.

#![warn(missing_docs)]

pub mod error;
pub mod features;
pub mod mnemonic;
pub mod model;

pub use error::CostError;
pub use features::{AreaFeatures, PowerFeatures, AREA_VECTOR_LEN, POWER_VECTOR_LEN};
pub use mnemonic::{lex_operator, parse_operator, OperatorToken};
pub use model::CostModel;
