//! Technology-library types and their TOML overlay representation.

use ppa_common::{Frequency, Operator};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Per-bit physical cost coefficients of one cell kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCoefficients {
    /// Area per bit.
    pub area: f64,
    /// Static (leakage) power per bit.
    pub static_power: f64,
    /// Dynamic power per bit.
    pub dynamic_power: f64,
}

impl CellCoefficients {
    /// Creates a coefficient triple.
    pub const fn new(area: f64, static_power: f64, dynamic_power: f64) -> Self {
        Self {
            area,
            static_power,
            dynamic_power,
        }
    }
}

/// The complete technology library consumed by the analysis models.
///
/// The operator table is keyed by the closed [`Operator`] set. A library
/// built from [`TechLibrary::default`] or [`crate::load_library`] has an
/// entry for every operator.
#[derive(Debug, Clone, PartialEq)]
pub struct TechLibrary {
    /// Coefficients of one flip-flop bit.
    pub sequential: CellCoefficients,
    /// Coefficients of one bit of each combinational operator.
    pub operators: BTreeMap<Operator, CellCoefficients>,
    /// Clock target, boundary delays and gate delays.
    pub timing: TimingLibrary,
    /// Sample sizing and percentile selection for slack calibration.
    pub calibration: CalibrationPolicy,
}

impl TechLibrary {
    /// Returns the coefficients of `op`, if the library lists it.
    pub fn operator(&self, op: Operator) -> Option<&CellCoefficients> {
        self.operators.get(&op)
    }
}

/// Timing constants of the target technology, all in nanoseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingLibrary {
    /// Target clock frequency.
    pub frequency: Frequency,
    /// Clock uncertainty subtracted from the period.
    pub clock_uncertainty_ns: f64,
    /// Library setup time of the capturing flip-flop.
    pub setup_ns: f64,
    /// External delay added to paths launched at a primary input.
    pub input_delay_ns: f64,
    /// External delay reserved at a primary output.
    pub output_delay_ns: f64,
    /// Clock-to-Q delay of a flip-flop.
    pub register_delay_ns: f64,
    /// Intrinsic delay of operators with a characterized gate.
    pub gate_delays: BTreeMap<Operator, f64>,
}

impl TimingLibrary {
    /// Required time at a register endpoint: `period - uncertainty - setup`.
    pub fn required_time_ns(&self) -> f64 {
        self.frequency.period_ns() - self.clock_uncertainty_ns - self.setup_ns
    }

    /// Returns the characterized delay of `op`, if any.
    pub fn gate_delay(&self, op: Operator) -> Option<f64> {
        self.gate_delays.get(&op).copied()
    }
}

/// Sample sizing and scale thresholds for slack calibration.
///
/// The number of predicted slacks considered for a design is
/// `sample_ratio * seq_bits`, forced to `min_samples` when the raw value
/// falls below `sparse_floor` and capped at `max_samples`. The scale `k` is
/// the sequential bit count in thousands: `k <= small_scale_kilo` selects the
/// 10th percentile, `k <= medium_scale_kilo` the 50th, anything larger the 90th.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationPolicy {
    /// Predicted paths sampled per sequential bit.
    pub sample_ratio: f64,
    /// Raw sample counts below this are replaced by `min_samples`.
    pub sparse_floor: f64,
    /// Sample count used for sparse designs.
    pub min_samples: usize,
    /// Upper bound on the sample count.
    pub max_samples: usize,
    /// Largest scale (thousands of sequential bits) calibrated at the 10th percentile.
    pub small_scale_kilo: f64,
    /// Largest scale calibrated at the 50th percentile.
    pub medium_scale_kilo: f64,
}

// ---------------------------------------------------------------------------
// TOML overlay
// ---------------------------------------------------------------------------

/// The on-disk form of a technology library: every field optional.
///
/// Values present in the file replace the corresponding built-in values;
/// absent values keep them. Operator tables are keyed by mnemonic and
/// resolved against [`Operator`] when the overlay is applied.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryFile {
    /// Flip-flop coefficient overrides.
    #[serde(default)]
    pub sequential: CoefficientOverride,
    /// Per-operator coefficient overrides, keyed by mnemonic.
    #[serde(default)]
    pub operators: BTreeMap<String, CoefficientOverride>,
    /// Timing constant overrides.
    #[serde(default)]
    pub timing: TimingOverride,
    /// Gate delay overrides (ns), keyed by mnemonic.
    #[serde(default)]
    pub gate_delays: BTreeMap<String, f64>,
    /// Calibration policy overrides.
    #[serde(default)]
    pub calibration: CalibrationOverride,
}

/// Optional replacement of individual [`CellCoefficients`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoefficientOverride {
    /// Area per bit.
    pub area: Option<f64>,
    /// Static power per bit.
    pub static_power: Option<f64>,
    /// Dynamic power per bit.
    pub dynamic_power: Option<f64>,
}

impl CoefficientOverride {
    /// Applies the present fields on top of `base`.
    pub fn apply(&self, base: CellCoefficients) -> CellCoefficients {
        CellCoefficients {
            area: self.area.unwrap_or(base.area),
            static_power: self.static_power.unwrap_or(base.static_power),
            dynamic_power: self.dynamic_power.unwrap_or(base.dynamic_power),
        }
    }
}

/// Optional replacement of [`TimingLibrary`] scalars.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingOverride {
    /// Target clock: a unit string ("1GHz", "800MHz") or a bare number of GHz.
    #[serde(default, deserialize_with = "deserialize_frequency")]
    pub frequency: Option<Frequency>,
    /// Clock uncertainty (ns).
    pub clock_uncertainty_ns: Option<f64>,
    /// Library setup time (ns).
    pub setup_ns: Option<f64>,
    /// Input delay (ns).
    pub input_delay_ns: Option<f64>,
    /// Output delay (ns).
    pub output_delay_ns: Option<f64>,
    /// Flip-flop clock-to-Q delay (ns).
    pub register_delay_ns: Option<f64>,
}

/// Optional replacement of [`CalibrationPolicy`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationOverride {
    /// Predicted paths sampled per sequential bit.
    pub sample_ratio: Option<f64>,
    /// Raw sample count below which `min_samples` is used.
    pub sparse_floor: Option<f64>,
    /// Sample count for sparse designs.
    pub min_samples: Option<usize>,
    /// Sample count cap.
    pub max_samples: Option<usize>,
    /// 10th-percentile scale limit (thousands of bits).
    pub small_scale_kilo: Option<f64>,
    /// 50th-percentile scale limit (thousands of bits).
    pub medium_scale_kilo: Option<f64>,
}

/// Accepts `"2GHz"`-style strings or bare numbers interpreted as GHz.
fn deserialize_frequency<'de, D>(deserializer: D) -> Result<Option<Frequency>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FrequencyVisitor;

    impl<'de> Visitor<'de> for FrequencyVisitor {
        type Value = Option<Frequency>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a frequency string such as \"2GHz\" or a number of GHz")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse::<Frequency>().map(Some).map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(Frequency::from_ghz(v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(Frequency::from_ghz(v as f64)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(Frequency::from_ghz(v as f64)))
        }
    }

    deserializer.deserialize_any(FrequencyVisitor)
}
