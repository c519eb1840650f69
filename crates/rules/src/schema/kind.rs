//! Value kind enum used both as a rule-table index and to pick a coercion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three comparable value representations a signal can declare.
///
/// The textual labels are the ones used by rule files and signal records:
/// `Integer` names the numeric kind (parsed as floating point) and `Datetime`
/// names the timestamp kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    #[serde(rename = "String")]
    String,
    #[serde(rename = "Integer")]
    Numeric,
    #[serde(rename = "Datetime")]
    Timestamp,
}

impl ValueKind {
    /// Every kind, in rule-entry slot order.
    pub const ALL: [ValueKind; 3] = [ValueKind::String, ValueKind::Numeric, ValueKind::Timestamp];

    /// Label used in rule files and signal records.
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::String => "String",
            ValueKind::Numeric => "Integer",
            ValueKind::Timestamp => "Datetime",
        }
    }

    /// Slot of this kind inside a [`RuleEntry`](super::RuleEntry).
    pub(crate) fn slot(&self) -> usize {
        match self {
            ValueKind::String => 0,
            ValueKind::Numeric => 1,
            ValueKind::Timestamp => 2,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "String" => Ok(ValueKind::String),
            "Integer" => Ok(ValueKind::Numeric),
            "Datetime" => Ok(ValueKind::Timestamp),
            other => Err(format!("unknown value kind: '{}'", other)),
        }
    }
}
