//! Signal evaluator: validate → coerce → look up → compare.
//!
//! Each call is independent: the evaluator only reads its [`RuleTable`], so
//! one instance can serve any number of call sites. Within one signal, matches
//! come out in rule-file order.
//!
//! Failure policy:
//! - undecodable or incomplete records are reported as processing failures
//! - unknown signal names and unconfigured kinds are silent no-ops
//! - an observed value that cannot take the declared kind matches nothing

mod compare;
mod settings;

use serde::Serialize;
use tracing::{debug, warn};

use crate::coerce::coerce_json;
use crate::schema::{RawSignal, RuleTable, Signal, SignalError, ValueKind};
use crate::sink::{Report, ReportSink, RuleMatch};

use compare::threshold_matches;

pub use settings::EvaluatorSettings;

// ── Evaluator ───────────────────────────────────────────────────────

/// Evaluates incoming signals against a loaded rule table.
#[derive(Debug, Clone)]
pub struct Evaluator {
    table: RuleTable,
    settings: EvaluatorSettings,
}

impl Evaluator {
    pub fn new(table: RuleTable, settings: EvaluatorSettings) -> Self {
        Self { table, settings }
    }

    /// Evaluator with the default mandatory fields and all kinds allowed.
    pub fn with_defaults(table: RuleTable) -> Self {
        Self::new(table, EvaluatorSettings::default())
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn settings(&self) -> &EvaluatorSettings {
        &self.settings
    }

    /// Decode, validate and check one raw signal.
    ///
    /// Returns every matching rule in rule-file order, or the reason the
    /// signal could not be processed. An empty list means nothing matched or
    /// no rule applies.
    pub fn evaluate(&self, raw: &RawSignal) -> Result<Vec<RuleMatch>, SignalError> {
        let record = raw.decode()?;
        let signal = Signal::from_record(&record, &self.settings.mandatory_fields)?;
        Ok(self.check(&signal))
    }

    /// Check an already validated signal against its rules.
    pub fn check(&self, signal: &Signal<'_>) -> Vec<RuleMatch> {
        let Some(entry) = self.table.get(signal.name) else {
            debug!(signal = %signal.name, "no rules for signal");
            return Vec::new();
        };

        let kind = match signal.value_type.parse::<ValueKind>() {
            Ok(kind) if self.settings.allows(kind) => kind,
            _ => {
                debug!(signal = %signal.name, value_type = %signal.value_type, "value type not allowed");
                return Vec::new();
            }
        };

        let rules = entry.rules(kind);
        if rules.is_empty() {
            debug!(signal = %signal.name, kind = %kind, "no rules for value type");
            return Vec::new();
        }

        let observed = match coerce_json(kind, signal.value) {
            Ok(v) => v,
            Err(e) => {
                warn!(signal = %signal.name, kind = %kind, error = %e, "observed value not comparable, no rules applied");
                return Vec::new();
            }
        };

        rules
            .iter()
            .filter(|t| threshold_matches(t, &observed))
            .map(|t| RuleMatch {
                signal: signal.name.to_string(),
                kind,
                operator: t.operator,
                line: t.line,
            })
            .collect()
    }

    /// Evaluate one signal and push its reports into `sink`.
    ///
    /// Emits one `Match` per matching rule, or a single `ProcessingFailure`.
    /// Returns the number of matches.
    pub fn process(&self, raw: &RawSignal, sink: &mut dyn ReportSink) -> Result<usize, SignalError> {
        match self.evaluate(raw) {
            Ok(matches) => {
                let count = matches.len();
                for m in matches {
                    sink.report(Report::Match(m));
                }
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "unable to process signal");
                sink.report(Report::ProcessingFailure {
                    raw: raw.to_string(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Process a sequence of signals in order.
    pub fn process_all<'a, I>(&self, signals: I, sink: &mut dyn ReportSink) -> RunStats
    where
        I: IntoIterator<Item = &'a RawSignal>,
    {
        let mut stats = RunStats::default();
        for raw in signals {
            stats.signals += 1;
            match self.process(raw, sink) {
                Ok(0) => {}
                Ok(n) => {
                    stats.matched_signals += 1;
                    stats.matches += n;
                }
                Err(_) => stats.failures += 1,
            }
        }
        stats
    }
}

/// Totals for one run over a signal sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub signals: usize,
    /// Signals with at least one match.
    pub matched_signals: usize,
    /// Matches across all signals (one per matching rule).
    pub matches: usize,
    pub failures: usize,
}

// ── Tests ───────────────────────────────────────────────────────────
