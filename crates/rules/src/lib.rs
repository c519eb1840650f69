//! Threshold rule engine for named, typed signals.
//!
//! This crate provides:
//! - Type coercion of raw values into string / numeric / timestamp kinds
//! - A line-oriented rule loader that builds a read-only rule table
//! - An evaluator that validates signals and reports every violated rule
//! - Report sinks for matches and processing failures
//! - Signal file reading for the `tripwire` binary

pub mod coerce;
pub mod evaluator;
pub mod input;
pub mod loader;
pub mod schema;
pub mod sink;

pub use evaluator::{Evaluator, EvaluatorSettings, RunStats};
pub use loader::{LoadOutcome, RuleLoader};
pub use schema::{RawSignal, RuleTable, SignalError, ValueKind};
pub use sink::{Report, ReportSink, RuleMatch};
