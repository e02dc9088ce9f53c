//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The analysis stage a diagnostic originates from.
///
/// Each category maps to a single-character prefix used when the code is
/// displayed (e.g. `T001` for a timing note, `R001` for a report warning).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Signal graph construction and width inference, prefixed with `G`.
    Graph,
    /// Area and power cost model, prefixed with `A`.
    Cost,
    /// Static timing analysis and slack, prefixed with `T`.
    Timing,
    /// Slack calibration, prefixed with `C`.
    Calibration,
    /// Reference timing report parsing, prefixed with `R`.
    Report,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Graph => 'G',
            Category::Cost => 'A',
            Category::Timing => 'T',
            Category::Calibration => 'C',
            Category::Report => 'R',
        }
    }
}

/// A category prefix plus a numeric identifier, displayed as `T001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(DiagnosticCode::new(Category::Timing, 1).to_string(), "T001");
        assert_eq!(DiagnosticCode::new(Category::Report, 12).to_string(), "R012");
        assert_eq!(DiagnosticCode::new(Category::Cost, 100).to_string(), "A100");
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Calibration, 1);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
