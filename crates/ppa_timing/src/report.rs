//! Slack extraction from reference timing reports.
//!
//! Only lines containing the literal `slack` are considered. Two forms are
//! accepted, matched case-insensitively:
//!
//! ```text
//!   slack (MET)                                    0.4520
//!   slack (VIOLATED: increase significant digits) -0.0001
//! ```
//!
//! The first numeric token after the closing parenthesis is the slack. Other
//! `slack` lines are reported as `R001` warnings and skipped.

use ppa_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use std::path::Path;

use crate::error::TimingError;

const VIOLATED_TAG: &str = "violated: increase significant digits";

/// Returns the text after a `slack (...)` tag starting at byte `at`, if one
/// of the accepted forms is there.
fn after_tag(line: &str, at: usize) -> Option<&str> {
    let rest = line[at + "slack".len()..].trim_start();
    let inner = rest.strip_prefix('(')?;
    let close = inner.find(')')?;
    let tag = &inner[..close];
    let is_word = !tag.is_empty() && tag.chars().all(|c| c.is_alphanumeric() || c == '_');
    if is_word || tag.eq_ignore_ascii_case(VIOLATED_TAG) {
        Some(&inner[close + 1..])
    } else {
        None
    }
}

fn first_number(text: &str) -> Option<f64> {
    text.split_whitespace()
        .filter(|tok| {
            tok.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        })
        .find_map(|tok| tok.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Extracts the slack of one report line.
///
/// Returns `None` for lines that do not carry a recognizable slack.
pub fn parse_slack_line(line: &str) -> Option<f64> {
    let lower = line.to_ascii_lowercase();
    lower
        .match_indices("slack")
        .find_map(|(at, _)| after_tag(line, at))
        .and_then(first_number)
}

/// Collects every slack value in `text`, in report order.
///
/// Lines containing `slack` that carry no recognizable value emit an `R001`
/// warning naming the line.
pub fn parse_reference_report(text: &str, sink: &DiagnosticSink) -> Vec<f64> {
    let mut slacks = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if !line.contains("slack") {
            continue;
        }
        match parse_slack_line(line) {
            Some(slack) => slacks.push(slack),
            None => sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::new(Category::Report, 1),
                    "unrecognized slack line skipped",
                )
                .with_subject(format!("line {}", lineno + 1))
                .with_note(line.trim().to_string()),
            ),
        }
    }
    slacks
}

/// Reads a reference report and keeps its first `limit` slacks.
pub fn read_reference_report(
    path: &Path,
    limit: usize,
    sink: &DiagnosticSink,
) -> Result<Vec<f64>, TimingError> {
    let text = std::fs::read_to_string(path).map_err(|e| TimingError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut slacks = parse_reference_report(&text, sink);
    slacks.truncate(limit);
    Ok(slacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppa_diagnostics::Severity;
    use std::io::Write;

    #[test]
    fn met_line() {
        assert_eq!(parse_slack_line("slack (MET) 0.452 ns"), Some(0.452));
        assert_eq!(parse_slack_line("  Slack (met)   0.1000"), Some(0.1));
    }

    #[test]
    fn violated_lines() {
        assert_eq!(parse_slack_line("  slack (VIOLATED)   -0.2310"), Some(-0.231));
        assert_eq!(
            parse_slack_line("slack (VIOLATED: increase significant digits)   -0.00"),
            Some(0.0)
        );
    }

    #[test]
    fn unrecognized_lines() {
        assert_eq!(parse_slack_line("slack (MET) n/a"), None);
        assert_eq!(parse_slack_line("total slack is bad"), None);
        assert_eq!(parse_slack_line("slack (two words) 1.0"), None);
    }

    #[test]
    fn report_collects_and_warns() {
        let text = "\
Startpoint: r1
  data arrival time                    0.35
  slack (MET)                          0.452 ns
  slack (VIOLATED)                    -0.120
  slack computation skipped
  SLACK (MET) 9.9
";
        let sink = DiagnosticSink::new();
        let slacks = parse_reference_report(text, &sink);
        assert_eq!(slacks, vec![0.452, -0.12]);

        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].code.to_string(), "R001");
        assert_eq!(diags[0].subject.as_deref(), Some("line 5"));
    }

    #[test]
    fn read_with_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "slack (MET) 0.1\nslack (MET) 0.2\nslack (MET) 0.3").unwrap();
        let sink = DiagnosticSink::new();
        let slacks = read_reference_report(file.path(), 2, &sink).unwrap();
        assert_eq!(slacks, vec![0.1, 0.2]);
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn missing_report_is_io_error() {
        let sink = DiagnosticSink::new();
        let err = read_reference_report(Path::new("/nonexistent/x.rpt"), 10, &sink).unwrap_err();
        assert!(matches!(err, TimingError::Io { .. }));
    }
}
