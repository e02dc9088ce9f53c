//! The closed set of combinational operator kinds.
//!
//! Operator nodes carry their kind as a mnemonic embedded in the node name
//! (`And3`, `Xor7`, `top.Plus12`). Every mnemonic the area, power and delay
//! tables know about is listed here; anything else is a configuration error
//! rather than a silently free operator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_operators {
    ($($(#[$meta:meta])* $variant:ident),* $(,)?) => {
        /// A combinational operator kind, named by its mnemonic.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub enum Operator {
            $($(#[$meta])* $variant,)*
        }

        impl Operator {
            /// Every supported operator, in declaration order.
            pub const ALL: &'static [Operator] = &[$(Operator::$variant,)*];

            /// Returns the mnemonic as it appears in node names.
            pub fn mnemonic(self) -> &'static str {
                match self {
                    $(Operator::$variant => stringify!($variant),)*
                }
            }
        }

        impl FromStr for Operator {
            type Err = UnknownOperator;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(Operator::$variant),)*
                    _ => Err(UnknownOperator {
                        mnemonic: s.to_string(),
                    }),
                }
            }
        }
    };
}

define_operators!(
    /// Bitwise AND.
    And,
    /// Logical AND.
    Land,
    /// Bitwise XOR.
    Xor,
    /// Bitwise XNOR.
    Xnor,
    /// Reduction XOR.
    Uxor,
    /// Bitwise OR.
    Or,
    /// Reduction NOR.
    Unor,
    /// Logical OR.
    Lor,
    /// Reduction OR.
    Uor,
    /// Bitwise NOT.
    Unot,
    /// Logical NOT.
    Ulnot,
    /// Reduction AND.
    Uand,
    /// Conditional (`?:`).
    Cond,
    /// Equality comparison (also the tail of `NotEq`, `LessEq`, `GreaterEq`).
    Eq,
    /// Concatenation.
    Concat,
    /// Addition.
    Plus,
    /// Subtraction.
    Minus,
    /// Unary negation.
    Uminus,
    /// Replication.
    Repeat,
    /// Division.
    Divide,
    /// Modulus.
    Mod,
    /// Multiplication.
    Times,
    /// Magnitude comparison (tail of `LessThan`, `GreaterThan`).
    Than,
    /// Arithmetic shift right.
    Sra,
    /// Arithmetic shift left.
    Sla,
    /// Logical shift left.
    Sll,
    /// Logical shift right.
    Srl,
    /// Case selection.
    Case,
    /// Multiplexer.
    Mux,
);

/// Gate families tallied separately in the area feature vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GateFamily {
    /// `And`.
    And,
    /// `Or`.
    Or,
    /// `Unot`, `Ulnot`.
    Not,
    /// `Xor`.
    Xor,
    /// `Cond`, `Mux`.
    Mux,
}

impl Operator {
    /// Returns the gate family this operator is counted under, if any.
    pub fn gate_family(self) -> Option<GateFamily> {
        match self {
            Operator::And => Some(GateFamily::And),
            Operator::Or => Some(GateFamily::Or),
            Operator::Unot | Operator::Ulnot => Some(GateFamily::Not),
            Operator::Xor => Some(GateFamily::Xor),
            Operator::Cond | Operator::Mux => Some(GateFamily::Mux),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned for a mnemonic outside the supported operator set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator {
    /// The unrecognized mnemonic.
    pub mnemonic: String,
}

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported operator mnemonic '{}'", self.mnemonic)
    }
}

impl std::error::Error for UnknownOperator {}
