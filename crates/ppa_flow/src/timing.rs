//! Timing feature extraction.

use ppa_common::DesignKey;
use ppa_config::TimingLibrary;
use ppa_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use ppa_graph::read_graph;
use ppa_timing::{annotate_delays, analyze_paths, DelayOracle, SlackCalculator, StaResult, TimingSummary};
use std::path::Path;

use crate::area::resolve_widths;
use crate::error::{FlowError, InDesign};
use crate::vectors::write_vector;

/// Result of a timing run.
#[derive(Debug, Clone)]
pub struct TimingOutcome {
    /// `[WNS, TNS]` over all paths.
    pub summary: TimingSummary,
    /// The analyzed paths and runtime.
    pub sta: StaResult,
}

/// Completes widths, annotates delays from `oracle`, analyzes every path and
/// writes `{stem}_vec_timing.json` to `out_dir`.
///
/// A width-inference stall fails the run as it does for area. A violated target is reported as a `T002` warning, not an error.
pub fn run_timing(
    graph_dir: &Path,
    out_dir: &Path,
    key: &DesignKey,
    timing: &TimingLibrary,
    oracle: &dyn DelayOracle,
    sink: &DiagnosticSink,
) -> Result<TimingOutcome, FlowError> {
    let mut graph = read_graph(graph_dir, key).in_design(&key.design)?;
    resolve_widths(&mut graph, key, sink)?;
    annotate_delays(&mut graph, oracle).in_design(&key.design)?;
    let sta = analyze_paths(&graph, sink).in_design(&key.design)?;
    let summary = SlackCalculator::new(timing).summarize_paths(&sta.paths);

    if !summary.is_met() {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::new(Category::Timing, 2),
                format!(
                    "timing not met at {}: WNS {:.4} ns, TNS {:.4} ns",
                    timing.frequency, summary.wns, summary.tns
                ),
            )
            .with_subject(key.stem()),
        );
    }

    write_vector(&out_dir.join(key.timing_vector_file()), &summary.to_vec())
        .in_design(&key.design)?;
    Ok(TimingOutcome { summary, sta })
}
