//! Built-in coefficient tables.
//!
//! Per-bit area in library units, power in library units, delays in ns.
//! Dynamic power comes from the gate-level table where it characterizes the
//! operator and from the full operator table otherwise.

use crate::types::{CalibrationPolicy, CellCoefficients, TechLibrary, TimingLibrary};
use ppa_common::{Frequency, Operator};

/// Flip-flop (DFF) coefficients per bit.
pub const DFF: CellCoefficients = CellCoefficients::new(4.522, 0.07911, 3.1);

/// Combinational operator coefficients per bit.
pub const OPERATOR_TABLE: &[(Operator, CellCoefficients)] = &[
    (Operator::And, CellCoefficients::new(1.064, 0.02507, 3.1)),
    (Operator::Land, CellCoefficients::new(1.064, 0.02507, 1.064)),
    (Operator::Xor, CellCoefficients::new(1.596, 0.03616, 2.45)),
    (Operator::Xnor, CellCoefficients::new(1.596, 0.03616, 2.43)),
    (Operator::Uxor, CellCoefficients::new(1.596, 0.03616, 2.43)),
    (Operator::Or, CellCoefficients::new(1.064, 0.02269, 3.1)),
    (Operator::Unor, CellCoefficients::new(0.798, 0.01282, 1.74)),
    (Operator::Lor, CellCoefficients::new(1.064, 0.02269, 2.71)),
    (Operator::Uor, CellCoefficients::new(1.064, 0.02269, 2.71)),
    (Operator::Unot, CellCoefficients::new(0.798, 0.106, 1.8)),
    (Operator::Ulnot, CellCoefficients::new(0.798, 0.106, 1.8)),
    (Operator::Uand, CellCoefficients::new(1.064, 0.02269, 2.71)),
    (Operator::Cond, CellCoefficients::new(1.862, 0.03593, 2.6)),
    (Operator::Eq, CellCoefficients::new(0.0, 0.0, 0.0)),
    (Operator::Concat, CellCoefficients::new(0.0, 0.0, 0.0)),
    (Operator::Plus, CellCoefficients::new(4.256, 0.07576, 4.95)),
    (Operator::Minus, CellCoefficients::new(4.256, 0.07576, 4.95)),
    (Operator::Uminus, CellCoefficients::new(4.256, 0.07576, 4.95)),
    (Operator::Repeat, CellCoefficients::new(0.0, 0.0, 0.0)),
    (Operator::Divide, CellCoefficients::new(40.0, 0.1, 40.0)),
    (Operator::Mod, CellCoefficients::new(35.0, 0.1, 35.0)),
    (Operator::Times, CellCoefficients::new(37.5, 0.1, 37.5)),
    (Operator::Than, CellCoefficients::new(0.0, 0.0, 0.0)),
    (Operator::Sra, CellCoefficients::new(3.0, 0.03, 3.0)),
    (Operator::Sla, CellCoefficients::new(3.0, 0.03, 3.0)),
    (Operator::Sll, CellCoefficients::new(3.0, 0.03, 3.0)),
    (Operator::Srl, CellCoefficients::new(3.0, 0.03, 3.0)),
    (Operator::Case, CellCoefficients::new(1.862, 0.03593, 3.38)),
    (Operator::Mux, CellCoefficients::new(1.862, 0.03593, 2.6)),
];

/// Characterized gate delays (ns). Operators absent here have no built-in delay.
pub const GATE_DELAYS: &[(Operator, f64)] = &[
    (Operator::And, 0.0496),
    (Operator::Or, 0.0323),
    (Operator::Ulnot, 0.0328),
    (Operator::Unot, 0.0328),
    (Operator::Mux, 0.0498),
    (Operator::Cond, 0.0498),
    (Operator::Xor, 0.0882),
    (Operator::Concat, 0.0),
];

impl Default for TechLibrary {
    fn default() -> Self {
        Self {
            sequential: DFF,
            operators: OPERATOR_TABLE.iter().copied().collect(),
            timing: TimingLibrary::default(),
            calibration: CalibrationPolicy::default(),
        }
    }
}

impl Default for TimingLibrary {
    fn default() -> Self {
        Self {
            frequency: Frequency::from_ghz(2.0),
            clock_uncertainty_ns: 0.05,
            setup_ns: 0.032,
            input_delay_ns: 0.0,
            output_delay_ns: 0.0,
            register_delay_ns: 0.1187,
            gate_delays: GATE_DELAYS.iter().copied().collect(),
        }
    }
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self {
            sample_ratio: 0.02,
            sparse_floor: 10.0,
            min_samples: 100,
            max_samples: 1000,
            small_scale_kilo: 3.0,
            medium_scale_kilo: 5.0,
        }
    }
}
