//! Rule-definition loader.
//!
//! Reads a line-oriented rule source (`signal,kind,operator,threshold`,
//! `#` comments), coerces every threshold up front and freezes the result
//! into a read-only [`RuleTable`](crate::schema::RuleTable). Invalid lines are
//! logged, collected and skipped; they never abort a load.

mod builder;
mod core;
mod error;


pub use self::builder::{ParsedRule, RuleTableBuilder};
pub use self::core::{parse_line, RuleLoader, COMMENT_PREFIX};
pub use self::error::{LoadOutcome, RejectedLine, Result, RuleError, RuleParseError};
