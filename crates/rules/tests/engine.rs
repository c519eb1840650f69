//! End-to-end tests: fixture rule file + fixture signal file through the
//! loader, evaluator and sinks.

use std::path::{Path, PathBuf};

use tripwire_rules::input::read_signals;
use tripwire_rules::loader::RuleParseError;
use tripwire_rules::sink::WriterSink;
use tripwire_rules::{Evaluator, RawSignal, Report, RuleLoader, RunStats, ValueKind};

/// Resolve the fixtures directory relative to the crate root.
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_evaluator() -> Evaluator {
    let outcome = RuleLoader::new(fixtures_dir().join("rules.txt"))
        .load()
        .unwrap_or_else(|e| panic!("Failed to load fixture rules: {}", e));
    Evaluator::with_defaults(outcome.table)
}

fn load_signals() -> Vec<RawSignal> {
    read_signals(&fixtures_dir().join("raw_data.json"))
        .unwrap_or_else(|e| panic!("Failed to read fixture signals: {}", e))
}

// ── rules.txt ───────────────────────────────────────────────

#[test]
fn fixture_rules_load_with_rejections() {
    let outcome = RuleLoader::new(fixtures_dir().join("rules.txt")).load().unwrap();

    assert_eq!(outcome.table.len(), 5);
    assert_eq!(outcome.table.rule_count(), 7);
    assert_eq!(
        outcome.table.signal_names().collect::<Vec<_>>(),
        vec!["ATL1", "ATL2", "ATL3", "ATL6", "ATL7"]
    );
    assert_eq!(
        outcome.table.get("ATL3").unwrap().rules(ValueKind::Numeric).len(),
        2
    );

    let rejected: Vec<_> = outcome.rejected.iter().map(|r| r.line_no).collect();
    assert_eq!(rejected, vec![10, 11, 12]);
    assert!(matches!(outcome.rejected[0].error, RuleParseError::FieldCount(3)));
    assert!(matches!(outcome.rejected[1].error, RuleParseError::UnknownKind(_)));
    assert!(matches!(outcome.rejected[2].error, RuleParseError::Coercion(_)));
}

// ── raw_data.json ───────────────────────────────────────────

#[test]
fn fixture_signals_produce_expected_reports() {
    let evaluator = load_evaluator();
    let signals = load_signals();
    assert_eq!(signals.len(), 12);

    let mut reports: Vec<Report> = Vec::new();
    let stats = evaluator.process_all(&signals, &mut reports);

    let matched: Vec<&str> = reports
        .iter()
        .filter_map(|r| match r {
            Report::Match(m) => Some(m.signal.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(matched, vec!["ATL1", "ATL2", "ATL3", "ATL6", "ATL6", "ATL6"]);

    assert_eq!(
        stats,
        RunStats {
            signals: 12,
            matched_signals: 5,
            matches: 6,
            failures: 2,
        }
    );
}

#[test]
fn fixture_output_matches_console_format() {
    let evaluator = load_evaluator();
    let signals = load_signals();

    let mut sink = WriterSink::new(Vec::new());
    evaluator.process_all(&signals, &mut sink);
    let out = String::from_utf8(sink.into_inner()).unwrap();

    assert_eq!(
        out,
        "ATL1\nATL2\nATL3\nATL6\nATL6\nunable to process\nATL6\nunable to process\n"
    );
}

#[test]
fn same_rules_loaded_twice_are_identical() {
    let path = fixtures_dir().join("rules.txt");
    let a = RuleLoader::new(&path).load().unwrap();
    let b = RuleLoader::new(&path).load().unwrap();
    assert_eq!(a.table, b.table);
    assert_eq!(a.rejected, b.rejected);
}
