//! Error types and load result structures for the rule loader.

use crate::coerce::CoercionError;
use crate::schema::RuleTable;

/// Errors that make the rule source itself unusable.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Why a single rule line was rejected. The line is skipped, loading goes on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleParseError {
    #[error("expected 4 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("unknown value kind '{0}'")]
    UnknownKind(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("threshold rejected: {0}")]
    Coercion(#[from] CoercionError),

    #[error("line is not valid UTF-8")]
    Encoding,
}

/// A rule line that did not make it into the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based line number in the rule source.
    pub line_no: usize,
    /// The line as read, without its terminator.
    pub line: String,
    pub error: RuleParseError,
}

/// Outcome of loading a rule source.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Every valid rule, indexed and frozen.
    pub table: RuleTable,
    /// Invalid lines, in source order.
    pub rejected: Vec<RejectedLine>,
}
