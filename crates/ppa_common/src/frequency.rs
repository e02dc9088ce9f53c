//! Clock frequencies with unit parsing and period conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored in Hertz.
///
/// Parses strings like "2GHz", "500MHz", "100KHz" and bare numbers (Hz).
/// Timing analysis works in nanoseconds, so [`period_ns`](Self::period_ns)
/// is the accessor most callers want.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Frequency(f64);

impl Frequency {
    /// Creates a frequency from a value in Hertz.
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Creates a frequency from a value in gigahertz.
    pub fn from_ghz(ghz: f64) -> Self {
        Self(ghz * 1_000_000_000.0)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Returns the frequency in gigahertz.
    pub fn ghz(&self) -> f64 {
        self.0 / 1_000_000_000.0
    }

    /// Returns the clock period in nanoseconds (`1 / f`).
    ///
    /// A zero frequency yields an infinite period.
    pub fn period_ns(&self) -> f64 {
        1_000_000_000.0 / self.0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000_000.0 {
            write!(f, "{}GHz", hz / 1_000_000_000.0)
        } else if hz >= 1_000_000.0 {
            write!(f, "{}MHz", hz / 1_000_000.0)
        } else if hz >= 1_000.0 {
            write!(f, "{}KHz", hz / 1_000.0)
        } else {
            write!(f, "{hz}Hz")
        }
    }
}

/// Error returned when a frequency string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseFrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid frequency: '{}'", self.input)
    }
}

impl std::error::Error for ParseFrequencyError {}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (digits, scale) = if let Some(num) = lower.strip_suffix("ghz") {
            (num, 1_000_000_000.0)
        } else if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1_000_000.0)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1_000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let val: f64 = digits.trim().parse().map_err(|_| err())?;
        Ok(Frequency(val * scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ghz() {
        let f: Frequency = "2GHz".parse().unwrap();
        assert_eq!(f.hz(), 2_000_000_000.0);
        assert_eq!(f.period_ns(), 0.5);
    }

    #[test]
    fn parse_mhz_case_insensitive() {
        let f: Frequency = "500mhz".parse().unwrap();
        assert_eq!(f.mhz(), 500.0);
        assert_eq!(f.period_ns(), 2.0);
    }

    #[test]
    fn parse_bare_number_is_hz() {
        let f: Frequency = "1000".parse().unwrap();
        assert_eq!(f.hz(), 1000.0);
    }

    #[test]
    fn parse_invalid() {
        assert!("fast".parse::<Frequency>().is_err());
        assert!("GHz".parse::<Frequency>().is_err());
    }

    #[test]
    fn from_ghz_matches_parse() {
        let parsed: Frequency = "1.5GHz".parse().unwrap();
        assert_eq!(Frequency::from_ghz(1.5), parsed);
        assert_eq!(parsed.ghz(), 1.5);
    }

    #[test]
    fn zero_frequency_has_infinite_period() {
        assert!(Frequency::new(0.0).period_ns().is_infinite());
    }

    #[test]
    fn display_selects_best_unit() {
        assert_eq!(format!("{}", Frequency::from_ghz(2.0)), "2GHz");
        assert_eq!(format!("{}", Frequency::new(250_000_000.0)), "250MHz");
        assert_eq!(format!("{}", Frequency::new(500.0)), "500Hz");
    }
}
