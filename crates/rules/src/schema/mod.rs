//! Typed rule and signal model.
//!
//! - `ValueKind` / `Operator`: closed vocabularies of the rule file
//! - `Threshold`: operator plus a threshold coerced at load time
//! - `RuleEntry` / `RuleTable`: the read-only index the evaluator consults
//! - `RawSignal` / `Signal`: incoming records before and after validation

mod kind;
mod operator;
mod signal;
mod table;
mod threshold;

pub use kind::*;
pub use operator::*;
pub use signal::*;
pub use table::*;
pub use threshold::*;
