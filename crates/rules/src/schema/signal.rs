//! Incoming signal records: raw input form and the validated view.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value as Json};

/// Field holding the signal name.
pub const SIGNAL_FIELD: &str = "signal";
/// Field holding the declared value kind label.
pub const VALUE_TYPE_FIELD: &str = "value_type";
/// Field holding the raw observed value.
pub const VALUE_FIELD: &str = "value";

/// Errors that stop a single signal from being evaluated.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Raw text could not be decoded into a record.
    #[error("Signal parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Record is not an object, lacks a mandatory field, or has a mistyped one.
    #[error("Signal validation error: {0}")]
    Validation(String),
}

/// A signal as handed over by the harness, before any checking.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSignal {
    /// Serialized JSON text that still has to be parsed.
    Text(String),
    /// Already-structured record.
    Record(Json),
}

impl RawSignal {
    /// Decode into a JSON record, parsing text input first.
    pub(crate) fn decode(&self) -> Result<Cow<'_, Json>, SignalError> {
        match self {
            RawSignal::Text(text) => Ok(Cow::Owned(serde_json::from_str(text)?)),
            RawSignal::Record(record) => Ok(Cow::Borrowed(record)),
        }
    }
}

impl From<Json> for RawSignal {
    /// JSON strings are treated as serialized signals; anything else is a record.
    fn from(value: Json) -> Self {
        match value {
            Json::String(text) => RawSignal::Text(text),
            other => RawSignal::Record(other),
        }
    }
}

impl From<String> for RawSignal {
    fn from(text: String) -> Self {
        RawSignal::Text(text)
    }
}

impl From<&str> for RawSignal {
    fn from(text: &str) -> Self {
        RawSignal::Text(text.to_string())
    }
}

impl fmt::Display for RawSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawSignal::Text(text) => f.write_str(text),
            RawSignal::Record(record) => write!(f, "{}", record),
        }
    }
}

/// A signal record whose mandatory fields are known to be present.
///
/// Borrows from the decoded record for the duration of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal<'a> {
    pub name: &'a str,
    /// Declared kind label, not yet checked against the known kinds.
    pub value_type: &'a str,
    pub value: &'a Json,
}

impl<'a> Signal<'a> {
    /// Validate a decoded record against the mandatory field list.
    ///
    /// `signal`, `value_type` and `value` are always required; `mandatory`
    /// may name more. `signal` and `value_type` must be strings.
    pub fn from_record(record: &'a Json, mandatory: &[String]) -> Result<Self, SignalError> {
        let fields = match record {
            Json::Object(fields) => fields,
            Json::Null => {
                return Err(SignalError::Validation("signal record is empty".to_string()))
            }
            other => {
                return Err(SignalError::Validation(format!(
                    "signal record must be an object, got {}",
                    json_type(other)
                )))
            }
        };

        let required = [SIGNAL_FIELD, VALUE_TYPE_FIELD, VALUE_FIELD];
        let missing = required
            .into_iter()
            .chain(mandatory.iter().map(String::as_str))
            .find(|key| !fields.contains_key(*key));
        if let Some(key) = missing {
            return Err(SignalError::Validation(format!(
                "missing mandatory field '{}'",
                key
            )));
        }

        let value = fields.get(VALUE_FIELD).ok_or_else(|| {
            SignalError::Validation(format!("missing mandatory field '{}'", VALUE_FIELD))
        })?;

        Ok(Self {
            name: string_field(fields, SIGNAL_FIELD)?,
            value_type: string_field(fields, VALUE_TYPE_FIELD)?,
            value,
        })
    }
}

fn string_field<'a>(fields: &'a Map<String, Json>, key: &str) -> Result<&'a str, SignalError> {
    match fields.get(key) {
        Some(Json::String(s)) => Ok(s.as_str()),
        Some(other) => Err(SignalError::Validation(format!(
            "field '{}' must be a string, got {}",
            key,
            json_type(other)
        ))),
        None => Err(SignalError::Validation(format!(
            "missing mandatory field '{}'",
            key
        ))),
    }
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
