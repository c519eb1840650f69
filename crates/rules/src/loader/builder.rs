//! Accumulates parsed rules and freezes them into a [`RuleTable`].

use indexmap::IndexMap;

use crate::schema::{RuleEntry, RuleTable, Threshold, ValueKind};

/// One valid rule line, ready to be indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRule {
    pub signal: String,
    pub kind: ValueKind,
    pub threshold: Threshold,
}

/// Mutable staging area for a rule table.
///
/// The table only exists once [`build`](Self::build) consumes the builder, so
/// nothing can add rules to a table the evaluator already holds.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    entries: IndexMap<String, RuleEntry>,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after any earlier rules for the same signal and kind.
    pub fn insert(&mut self, rule: ParsedRule) -> &mut Self {
        self.entries
            .entry(rule.signal)
            .or_default()
            .push(rule.kind, rule.threshold);
        self
    }

    /// Total thresholds staged so far, across all signals and kinds.
    pub fn rule_count(&self) -> usize {
        self.entries.values().map(RuleEntry::len).sum()
    }

    /// True when no rule has been staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> RuleTable {
        RuleTable::from_entries(self.entries)
    }
}

impl FromIterator<ParsedRule> for RuleTableBuilder {
    fn from_iter<I: IntoIterator<Item = ParsedRule>>(iter: I) -> Self {
        let mut builder = Self::new();
        for rule in iter {
            builder.insert(rule);
        }
        builder
    }
}
