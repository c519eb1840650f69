//! Operator + pre-coerced threshold pairs stored in the rule table.

use std::borrow::Cow;
use std::fmt;

use crate::coerce::{coerce, now, CoercionError, Value, NOW_LITERAL};

use super::{Operator, ValueKind};

/// Threshold operand of a rule, coerced once at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdValue {
    /// A literal already converted to its kind's representation.
    Fixed(Value),
    /// The `now` timestamp literal, resolved against the wall clock on every comparison.
    Now,
}

impl ThresholdValue {
    /// Coerce a rule's threshold literal with the coercion function for `kind`.
    pub fn parse(kind: ValueKind, literal: &str) -> Result<Self, CoercionError> {
        if kind == ValueKind::Timestamp && literal == NOW_LITERAL {
            return Ok(ThresholdValue::Now);
        }
        coerce(kind, literal).map(ThresholdValue::Fixed)
    }

    /// The comparable value at this instant.
    pub fn resolve(&self) -> Cow<'_, Value> {
        match self {
            ThresholdValue::Fixed(v) => Cow::Borrowed(v),
            ThresholdValue::Now => Cow::Owned(Value::Timestamp(now())),
        }
    }
}

impl fmt::Display for ThresholdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdValue::Fixed(v) => v.fmt(f),
            ThresholdValue::Now => f.write_str(NOW_LITERAL),
        }
    }
}

/// A single `(operator, threshold)` constraint from one rule line.
///
/// Equality ignores `line`: two tables holding the same rules in the same
/// order are equal even if the rule sources were numbered differently.
#[derive(Debug, Clone)]
pub struct Threshold {
    pub operator: Operator,
    pub value: ThresholdValue,
    /// 1-based line of the rule source this threshold came from.
    pub line: usize,
}

impl PartialEq for Threshold {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.value == other.value
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.value)
    }
}
