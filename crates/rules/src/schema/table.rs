//! Read-only rule index: signal name → value kind → ordered thresholds.

use indexmap::IndexMap;

use super::{Threshold, ValueKind};

/// Rules configured for one signal name, one ordered list per [`ValueKind`].
///
/// Lists keep rule-file order; duplicates are kept and match independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleEntry {
    slots: [Vec<Threshold>; 3],
}

impl RuleEntry {
    /// Thresholds registered for `kind`, in rule-file order.
    pub fn rules(&self, kind: ValueKind) -> &[Threshold] {
        &self.slots[kind.slot()]
    }

    /// Kinds that have at least one threshold.
    pub fn configured_kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        ValueKind::ALL
            .into_iter()
            .filter(move |k| !self.rules(*k).is_empty())
    }

    /// Total thresholds across all kinds.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, kind: ValueKind, threshold: Threshold) {
        self.slots[kind.slot()].push(threshold);
    }
}

/// Fully loaded rule index.
///
/// Only the loader's builder can add rules; once handed out the table is
/// immutable and can be shared freely between evaluation call sites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    entries: IndexMap<String, RuleEntry>,
}

impl RuleTable {
    pub(crate) fn from_entries(entries: IndexMap<String, RuleEntry>) -> Self {
        Self { entries }
    }

    /// Exact, case-sensitive lookup by signal name.
    pub fn get(&self, signal: &str) -> Option<&RuleEntry> {
        self.entries.get(signal)
    }

    pub fn contains(&self, signal: &str) -> bool {
        self.entries.contains_key(signal)
    }

    /// Signal names in first-seen order.
    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct signal names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total thresholds across all signals and kinds.
    pub fn rule_count(&self) -> usize {
        self.entries.values().map(RuleEntry::len).sum()
    }

    /// Log one line per signal/kind for startup diagnostics.
    pub fn log_summary(&self) {
        tracing::info!(
            "Rule table: {} signals, {} rules",
            self.len(),
            self.rule_count()
        );
        for (name, entry) in self.iter() {
            for kind in entry.configured_kinds() {
                let rules: Vec<String> = entry.rules(kind).iter().map(|t| t.to_string()).collect();
                tracing::info!("  {:<12} {:<8} [{}]", name, kind, rules.join(", "));
            }
        }
    }
}
