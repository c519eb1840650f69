use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_list(profile: &str, key: &str, default: &[&str]) -> Vec<String> {
    match profiled_env_opt(profile, key) {
        Some(raw) => parse_list(&raw),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// Split a comma-separated env value, dropping blanks and surrounding whitespace.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fields every signal record must carry, in addition to any configured ones.
pub const DEFAULT_MANDATORY_SIGNAL_FIELDS: &[&str] = &["signal", "value_type", "value"];

/// Value type labels accepted on incoming signals by default.
pub const DEFAULT_ALLOWED_VALUE_TYPES: &[&str] = &["String", "Integer", "Datetime"];

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub engine: EngineConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TRIPWIRE_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TRIPWIRE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            engine: EngineConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  rules:       path={}", self.engine.rules_path.display());
        tracing::info!("  signals:     path={}", self.engine.signals_path.display());
        tracing::info!("  mandatory:   {}", self.engine.mandatory_signal_fields.join(","));
        tracing::info!("  value types: {}", self.engine.allowed_value_types.join(","));
    }
}

// ── Engine ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Rule definition file (one `signal,kind,operator,threshold` rule per line).
    pub rules_path: PathBuf,
    /// Input file holding the signals to evaluate.
    pub signals_path: PathBuf,
    /// Field names a signal record must contain to be processed.
    pub mandatory_signal_fields: Vec<String>,
    /// Value type labels (`String`, `Integer`, `Datetime`) accepted on signals.
    pub allowed_value_types: Vec<String>,
}

impl EngineConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            rules_path: PathBuf::from(profiled_env_or(p, "RULES_PATH", "rules.txt")),
            signals_path: PathBuf::from(profiled_env_or(p, "SIGNALS_PATH", "raw_data.json")),
            mandatory_signal_fields: profiled_env_list(
                p,
                "MANDATORY_SIGNAL_FIELDS",
                DEFAULT_MANDATORY_SIGNAL_FIELDS,
            ),
            allowed_value_types: profiled_env_list(
                p,
                "ALLOWED_SIGNAL_VALUE_TYPES",
                DEFAULT_ALLOWED_VALUE_TYPES,
            ),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from("rules.txt"),
            signals_path: PathBuf::from("raw_data.json"),
            mandatory_signal_fields: DEFAULT_MANDATORY_SIGNAL_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_value_types: DEFAULT_ALLOWED_VALUE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
