//! Report sinks: where match and failure notifications go.
//!
//! The evaluator only knows the [`ReportSink`] trait; the harness picks the
//! transport (stdout lines, tracing events, an in-memory list, a closure).

use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

use crate::schema::{Operator, ValueKind};

/// One matched rule for one signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleMatch {
    /// Name of the signal that violated the rule.
    pub signal: String,
    pub kind: ValueKind,
    pub operator: Operator,
    /// Rule-file line of the matched rule.
    pub line: usize,
}

/// Notification emitted while processing signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Report {
    /// A rule matched. Emitted once per matching rule.
    Match(RuleMatch),
    /// The signal could not be parsed or validated and was dropped.
    ProcessingFailure { raw: String, error: String },
}

/// Destination for [`Report`]s.
pub trait ReportSink {
    fn report(&mut self, report: Report);
}

impl ReportSink for Vec<Report> {
    fn report(&mut self, report: Report) {
        self.push(report);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(Report)> ReportSink for FnSink<F> {
    fn report(&mut self, report: Report) {
        (self.0)(report);
    }
}

/// Emits every report as a tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&mut self, report: Report) {
        match report {
            Report::Match(m) => info!(
                signal = %m.signal,
                kind = %m.kind,
                operator = %m.operator,
                line = m.line,
                "rule matched"
            ),
            Report::ProcessingFailure { raw, error } => {
                warn!(raw = %raw, error = %error, "unable to process signal")
            }
        }
    }
}

/// Line printed for a signal that could not be processed.
pub const PROCESSING_FAILURE_LINE: &str = "unable to process";

/// Writes one line per report: the signal name for a match, a fixed
/// failure line otherwise.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn report(&mut self, report: Report) {
        let result = match &report {
            Report::Match(m) => writeln!(self.out, "{}", m.signal),
            Report::ProcessingFailure { .. } => writeln!(self.out, "{}", PROCESSING_FAILURE_LINE),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to write report");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> Report {
        Report::Match(RuleMatch {
            signal: "ATL6".into(),
            kind: ValueKind::Numeric,
            operator: Operator::GreaterThan,
            line: 3,
        })
    }

    #[test]
    fn writer_sink_prints_signal_names_and_failures() {
        let mut sink = WriterSink::new(Vec::new());
        sink.report(sample_match());
        sink.report(Report::ProcessingFailure {
            raw: "{bad".into(),
            error: "parse".into(),
        });
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "ATL6\nunable to process\n");
    }

    #[test]
    fn fn_sink_forwards_reports() {
        let mut seen = 0;
        {
            let mut sink = FnSink(|_r: Report| seen += 1);
            sink.report(sample_match());
            sink.report(sample_match());
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn reports_serialize_with_event_tag() {
        let json = serde_json::to_value(sample_match()).unwrap();
        assert_eq!(json["event"], "match");
        assert_eq!(json["signal"], "ATL6");
        assert_eq!(json["kind"], "Integer");
        assert_eq!(json["operator"], ">");
    }
}
