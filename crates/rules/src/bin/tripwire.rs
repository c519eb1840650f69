//! tripwire: evaluate a signal file against a rule file.
//!
//! Prints the name of every signal that violates a rule (once per matching
//! rule) and `unable to process` for signals that cannot be decoded or lack
//! mandatory fields. Diagnostics go to the tracing subscriber on stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tripwire_core::config::load_dotenv;
use tripwire_core::Config;
use tripwire_rules::input::read_signals;
use tripwire_rules::sink::WriterSink;
use tripwire_rules::{Evaluator, EvaluatorSettings, RuleLoader};

// ── CLI ─────────────────────────────────────────────────────────────

/// Threshold rule checker for signal streams.
#[derive(Parser, Debug)]
#[command(name = "tripwire", version, about)]
struct Cli {
    /// Rule definition file (overrides RULES_PATH).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Signal input file, JSON array or JSON Lines (overrides SIGNALS_PATH).
    #[arg(long)]
    signals: Option<PathBuf>,

    /// Config profile; keys are looked up as {PROFILE}_{KEY} first
    /// (defaults to TRIPWIRE_PROFILE).
    #[arg(long)]
    profile: Option<String>,
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let mut config = match cli.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    if let Some(rules) = cli.rules {
        config.engine.rules_path = rules;
    }
    if let Some(signals) = cli.signals {
        config.engine.signals_path = signals;
    }
    config.log_summary();

    let settings = EvaluatorSettings::from_config(&config.engine)?;

    let outcome = RuleLoader::new(&config.engine.rules_path)
        .load()
        .with_context(|| format!("reading rules from {}", config.engine.rules_path.display()))?;
    outcome.table.log_summary();

    let signals = read_signals(&config.engine.signals_path)
        .with_context(|| format!("reading signals from {}", config.engine.signals_path.display()))?;

    let evaluator = Evaluator::new(outcome.table, settings);
    let stdout = io::stdout();
    let mut sink = WriterSink::new(stdout.lock());

    let start = Instant::now();
    let stats = evaluator.process_all(&signals, &mut sink);
    let elapsed = start.elapsed();

    sink.into_inner().flush()?;

    info!(
        signals = stats.signals,
        matched_signals = stats.matched_signals,
        matches = stats.matches,
        failures = stats.failures,
        invalid_rules = outcome.rejected.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "run complete"
    );
    Ok(())
}
