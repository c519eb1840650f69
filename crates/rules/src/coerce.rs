//! Type coercion from raw signal/rule text into comparable values.
//!
//! Each [`ValueKind`] has exactly one canonical representation:
//! - `String`    → lowercased text
//! - `Integer`   → `f64`
//! - `Datetime`  → naive local timestamp in `YYYY-MM-DD HH:MM:SS` form,
//!   or the current wall clock for the literal `now`

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{Local, NaiveDateTime};

use crate::schema::ValueKind;

/// Fixed timestamp layout accepted by the `Datetime` kind.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Literal that resolves to the wall clock at conversion time.
pub const NOW_LITERAL: &str = "now";

/// Errors raised when a raw value cannot take the requested kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionError {
    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("'{0}' is not a timestamp (expected YYYY-MM-DD HH:MM:SS or 'now')")]
    BadTimestamp(String),
}

/// A value already converted to its kind's native representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Numeric(f64),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::String,
            Value::Numeric(_) => ValueKind::Numeric,
            Value::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Order two values of the same kind.
    ///
    /// Mixed kinds and NaN have no ordering.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Numeric(a), Value::Numeric(b)) => a.partial_cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Numeric(n) => write!(f, "{}", n),
            Value::Timestamp(t) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
        }
    }
}

// ── Single-kind conversions ─────────────────────────────────────────

/// Lowercase the textual form of a value. Never fails.
pub fn to_text(raw: &str) -> String {
    raw.to_lowercase()
}

/// Parse a floating-point number, ignoring surrounding whitespace.
pub fn to_numeric(raw: &str) -> Result<f64, CoercionError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoercionError::NotNumeric(raw.to_string()))
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp, or `now` for the current local time.
pub fn to_timestamp(raw: &str) -> Result<NaiveDateTime, CoercionError> {
    if raw == NOW_LITERAL {
        return Ok(now());
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| CoercionError::BadTimestamp(raw.to_string()))
}

/// Current local wall-clock time.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ── Kind dispatch ───────────────────────────────────────────────────

/// Convert raw text using the coercion function for `kind`.
pub fn coerce(kind: ValueKind, raw: &str) -> Result<Value, CoercionError> {
    match kind {
        ValueKind::String => Ok(Value::Text(to_text(raw))),
        ValueKind::Numeric => to_numeric(raw).map(Value::Numeric),
        ValueKind::Timestamp => to_timestamp(raw).map(Value::Timestamp),
    }
}

/// Convert a JSON value as supplied on a signal record.
///
/// JSON numbers feed the numeric kind directly; everything else goes through
/// its textual form.
pub fn coerce_json(kind: ValueKind, raw: &serde_json::Value) -> Result<Value, CoercionError> {
    if let (ValueKind::Numeric, Some(n)) = (kind, raw.as_f64()) {
        return Ok(Value::Numeric(n));
    }
    coerce(kind, &textual_form(raw))
}

/// Textual form of a JSON value: strings as-is, everything else as compact JSON.
pub fn textual_form(raw: &serde_json::Value) -> Cow<'_, str> {
    match raw {
        serde_json::Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn text_is_lowercased() {
        assert_eq!(to_text("HIGH"), "high");
        assert_eq!(to_text("MiXeD 42"), "mixed 42");
    }

    #[test]
    fn numeric_parses_floats_and_trims() {
        assert_eq!(to_numeric("10"), Ok(10.0));
        assert_eq!(to_numeric(" 2.5 "), Ok(2.5));
        assert_eq!(to_numeric("-3e2"), Ok(-300.0));
    }

    #[test]
    fn numeric_rejects_text() {
        assert_eq!(
            to_numeric("HIGH"),
            Err(CoercionError::NotNumeric("HIGH".to_string()))
        );
        assert!(to_numeric("").is_err());
    }

    #[test]
    fn timestamp_parses_fixed_format() {
        assert_eq!(
            to_timestamp("2017-01-01 10:11:12"),
            Ok(ts(2017, 1, 1, 10, 11, 12))
        );
    }

    #[test]
    fn timestamp_rejects_other_layouts() {
        assert!(to_timestamp("2017-01-01").is_err());
        assert!(to_timestamp("2017-01-01T10:11:12").is_err());
        assert!(to_timestamp("NOW").is_err());
    }

    #[test]
    fn timestamp_now_is_current_time() {
        let before = now();
        let parsed = to_timestamp("now").unwrap();
        let after = now();
        assert!(before <= parsed && parsed <= after);
    }

    #[test]
    fn coerce_dispatches_by_kind() {
        assert_eq!(
            coerce(ValueKind::String, "Low").unwrap(),
            Value::Text("low".into())
        );
        assert_eq!(coerce(ValueKind::Numeric, "7").unwrap(), Value::Numeric(7.0));
        assert_eq!(
            coerce(ValueKind::Timestamp, "2020-02-29 00:00:00").unwrap(),
            Value::Timestamp(ts(2020, 2, 29, 0, 0, 0))
        );
    }

    #[test]
    fn coerce_json_accepts_numbers_and_strings() {
        assert_eq!(
            coerce_json(ValueKind::Numeric, &json!(25)).unwrap(),
            Value::Numeric(25.0)
        );
        assert_eq!(
            coerce_json(ValueKind::Numeric, &json!("25")).unwrap(),
            Value::Numeric(25.0)
        );
        assert_eq!(
            coerce_json(ValueKind::String, &json!(25)).unwrap(),
            Value::Text("25".into())
        );
        assert_eq!(
            coerce_json(ValueKind::String, &json!(true)).unwrap(),
            Value::Text("true".into())
        );
        assert!(coerce_json(ValueKind::Numeric, &json!(null)).is_err());
        assert!(coerce_json(ValueKind::Timestamp, &json!(20170101)).is_err());
    }

    #[test]
    fn compare_same_kind_only() {
        let a = Value::Numeric(1.0);
        let b = Value::Numeric(2.0);
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(a.compare(&Value::Text("1".into())), None);
        assert_eq!(Value::Numeric(f64::NAN).compare(&b), None);
    }
}
