//! Slack computation and `[WNS, TNS]` aggregation.

use ppa_config::TimingLibrary;
use ppa_graph::NodeKind;
use serde::{Deserialize, Serialize};

use crate::sta::TimingPath;

/// Where a path is launched and captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathBoundary {
    /// Register to register.
    RegToReg,
    /// Primary input to register.
    InToReg,
    /// Register to primary output.
    RegToOut,
    /// Primary input to primary output.
    InToOut,
}

impl PathBoundary {
    /// Every boundary class.
    pub const ALL: [PathBoundary; 4] = [
        PathBoundary::RegToReg,
        PathBoundary::InToReg,
        PathBoundary::RegToOut,
        PathBoundary::InToOut,
    ];

    /// Classifies a path by the kinds of its launch and capture nodes.
    ///
    /// Only a register launch counts as a register start; only a register
    /// capture counts as a register end. Everything else is a design
    /// boundary.
    pub fn classify(launch: Option<NodeKind>, capture: Option<NodeKind>) -> Self {
        let from_reg = launch == Some(NodeKind::Reg);
        let to_reg = capture == Some(NodeKind::Reg);
        match (from_reg, to_reg) {
            (true, true) => PathBoundary::RegToReg,
            (false, true) => PathBoundary::InToReg,
            (true, false) => PathBoundary::RegToOut,
            (false, false) => PathBoundary::InToOut,
        }
    }

    /// Returns `true` if the path starts at a primary input.
    pub fn starts_at_input(self) -> bool {
        matches!(self, PathBoundary::InToReg | PathBoundary::InToOut)
    }

    /// Returns `true` if the path ends at a primary output.
    pub fn ends_at_output(self) -> bool {
        matches!(self, PathBoundary::RegToOut | PathBoundary::InToOut)
    }
}

/// Worst and total negative slack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Minimum clamped slack; zero when timing is met.
    pub wns: f64,
    /// Sum of clamped slacks.
    pub tns: f64,
}

impl TimingSummary {
    /// Aggregates already-clamped slacks. An empty population is `[0, 0]`.
    pub fn from_slacks(slacks: &[f64]) -> Self {
        if slacks.is_empty() {
            return Self::default();
        }
        Self {
            wns: slacks.iter().copied().fold(f64::INFINITY, f64::min),
            tns: slacks.iter().sum(),
        }
    }

    /// `[WNS, TNS]`.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.wns, self.tns]
    }

    /// Returns `true` if no path violates.
    pub fn is_met(&self) -> bool {
        self.wns >= 0.0
    }
}

/// Required/arrival arithmetic of one timing library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlackCalculator {
    required_ns: f64,
    input_delay_ns: f64,
    output_delay_ns: f64,
}

impl SlackCalculator {
    /// Captures the clock target and I/O delays of `timing`.
    pub fn new(timing: &TimingLibrary) -> Self {
        Self {
            required_ns: timing.required_time_ns(),
            input_delay_ns: timing.input_delay_ns,
            output_delay_ns: timing.output_delay_ns,
        }
    }

    /// Required time: period minus uncertainty and setup, minus the output
    /// delay for paths ending at an output.
    pub fn required(&self, boundary: PathBoundary) -> f64 {
        if boundary.ends_at_output() {
            self.required_ns - self.output_delay_ns
        } else {
            self.required_ns
        }
    }

    /// Arrival time: path delay plus the input delay for paths starting at
    /// an input.
    pub fn arrival(&self, delay_ns: f64, boundary: PathBoundary) -> f64 {
        if boundary.starts_at_input() {
            delay_ns + self.input_delay_ns
        } else {
            delay_ns
        }
    }

    /// Slack of one path, clamped to at most zero.
    pub fn slack(&self, delay_ns: f64, boundary: PathBoundary) -> f64 {
        (self.required(boundary) - self.arrival(delay_ns, boundary)).min(0.0)
    }

    /// Clamped slacks of paths that share a boundary class.
    pub fn slacks(&self, delays: &[f64], boundary: PathBoundary) -> Vec<f64> {
        delays.iter().map(|&d| self.slack(d, boundary)).collect()
    }

    /// `[WNS, TNS]` of delays that share a boundary class.
    pub fn summarize(&self, delays: &[f64], boundary: PathBoundary) -> TimingSummary {
        TimingSummary::from_slacks(&self.slacks(delays, boundary))
    }

    /// `[WNS, TNS]` over paths, each judged by its own boundary class.
    pub fn summarize_paths(&self, paths: &[TimingPath]) -> TimingSummary {
        let slacks: Vec<f64> = paths
            .iter()
            .map(|p| self.slack(p.delay_ns, p.boundary))
            .collect();
        TimingSummary::from_slacks(&slacks)
    }
}
