//! Comparison operators available to threshold rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator symbol of a threshold rule.
///
/// `NotEqual` is spelled `!=` in rule files but matches when the observed value
/// EQUALS the threshold. Existing rule files depend on that reading, so the
/// symbol keeps its historical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "!=")]
    NotEqual,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::GreaterThan),
            "<" => Ok(Operator::LessThan),
            "!=" => Ok(Operator::NotEqual),
            other => Err(format!("unknown operator: '{}'", other)),
        }
    }
}
