//! Operator dispatch over coerced values.

use std::cmp::Ordering;

use crate::coerce::Value;
use crate::schema::{Operator, Threshold};

/// Apply `operator` with the rule's threshold on the left and the observed
/// value on the right.
///
/// `NotEqual` keeps the rule vocabulary's historical meaning and matches on
/// equality. Values without an ordering (mixed kinds, NaN) never match.
pub(crate) fn apply(operator: Operator, threshold: &Value, observed: &Value) -> bool {
    let Some(ordering) = observed.compare(threshold) else {
        return false;
    };
    match operator {
        Operator::GreaterThan => ordering == Ordering::Greater,
        Operator::LessThan => ordering == Ordering::Less,
        Operator::NotEqual => ordering == Ordering::Equal,
    }
}

/// Whether `observed` satisfies one stored threshold.
pub(crate) fn threshold_matches(threshold: &Threshold, observed: &Value) -> bool {
    apply(threshold.operator, &threshold.value.resolve(), observed)
}
