//! Core [`RuleLoader`]: file-backed rule loading and per-line parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::schema::{Operator, Threshold, ThresholdValue, ValueKind};

use super::builder::{ParsedRule, RuleTableBuilder};
use super::error::{LoadOutcome, RejectedLine, Result, RuleParseError};

/// Lines starting with this prefix are comments.
pub const COMMENT_PREFIX: char = '#';

/// Loads the rule table from a rule-definition file.
///
/// Format: one `signalName,valueKind,operatorSymbol,thresholdLiteral` rule per
/// line, `#` comment lines, blank lines ignored. Fields are taken verbatim;
/// signal names are case-sensitive keys.
pub struct RuleLoader {
    /// Rule-definition file.
    path: PathBuf,
}

impl RuleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the rule file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and index the rule file.
    ///
    /// Only an unreadable file is an error; invalid lines end up in
    /// [`LoadOutcome::rejected`].
    pub fn load(&self) -> Result<LoadOutcome> {
        let file = File::open(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to open rule file");
            e
        })?;
        let outcome = Self::load_reader(BufReader::new(file))?;
        info!(
            path = %self.path.display(),
            signals = outcome.table.len(),
            rules = outcome.table.rule_count(),
            invalid = outcome.rejected.len(),
            "loaded rule file"
        );
        Ok(outcome)
    }

    /// Index rules from any buffered reader.
    ///
    /// A line that is not valid UTF-8 is rejected on its own; only a failing
    /// read aborts the load.
    pub fn load_reader<R: BufRead>(reader: R) -> Result<LoadOutcome> {
        let mut acc = Accumulator::default();
        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let line_no = idx + 1;
            match String::from_utf8(bytes?) {
                Ok(line) => acc.feed(line_no, line.trim_end_matches('\r')),
                Err(e) => {
                    let line = String::from_utf8_lossy(e.as_bytes());
                    let line = line.trim_end_matches('\r').to_string();
                    acc.reject(line_no, line, RuleParseError::Encoding);
                }
            }
        }
        Ok(acc.finish())
    }

    /// Index rules from in-memory text.
    pub fn load_str(source: &str) -> LoadOutcome {
        let mut acc = Accumulator::default();
        for (idx, line) in source.lines().enumerate() {
            acc.feed(idx + 1, line);
        }
        acc.finish()
    }
}

#[derive(Default)]
struct Accumulator {
    builder: RuleTableBuilder,
    rejected: Vec<RejectedLine>,
}

impl Accumulator {
    fn feed(&mut self, line_no: usize, line: &str) {
        match parse_line(line_no, line) {
            Ok(Some(rule)) => {
                self.builder.insert(rule);
            }
            Ok(None) => {}
            Err(error) => self.reject(line_no, line.to_string(), error),
        }
    }

    fn reject(&mut self, line_no: usize, line: String, error: RuleParseError) {
        warn!(line = line_no, rule = %line, error = %error, "invalid rule");
        self.rejected.push(RejectedLine {
            line_no,
            line,
            error,
        });
    }

    fn finish(self) -> LoadOutcome {
        LoadOutcome {
            table: self.builder.build(),
            rejected: self.rejected,
        }
    }
}

/// Parse one rule line.
///
/// Returns `Ok(None)` for comments and blank lines. The threshold literal is
/// coerced with the kind's coercion function, so a rule that could never be
/// compared is rejected here rather than at evaluation time.
pub fn parse_line(line_no: usize, line: &str) -> std::result::Result<Option<ParsedRule>, RuleParseError> {
    if line.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').collect();
    let &[signal, kind, operator, literal] = fields.as_slice() else {
        return Err(RuleParseError::FieldCount(fields.len()));
    };

    let kind: ValueKind = kind
        .parse()
        .map_err(|_| RuleParseError::UnknownKind(kind.to_string()))?;
    let operator: Operator = operator
        .parse()
        .map_err(|_| RuleParseError::UnknownOperator(operator.to_string()))?;
    let value = ThresholdValue::parse(kind, literal)?;

    Ok(Some(ParsedRule {
        signal: signal.to_string(),
        kind,
        threshold: Threshold {
            operator,
            value,
            line: line_no,
        },
    }))
}
