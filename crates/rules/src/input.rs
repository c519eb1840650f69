//! Signal input files for the harness.
//!
//! Two layouts are accepted:
//! - a JSON array, one element per signal (JSON strings are serialized
//!   signals, anything else is a record)
//! - JSON Lines, one serialized signal per non-empty line

use std::fs;
use std::path::Path;

use tripwire_core::{Result, TripwireError};

use crate::schema::RawSignal;

/// Read and split a signal file.
pub fn read_signals(path: &Path) -> Result<Vec<RawSignal>> {
    let text = fs::read_to_string(path)?;
    parse_signals(&text)
}

/// Split signal file contents into raw signals without validating them.
///
/// A malformed array is an error for the whole file; a malformed line in
/// JSON Lines input is kept and fails later as that signal's parse error.
pub fn parse_signals(text: &str) -> Result<Vec<RawSignal>> {
    if text.trim_start().starts_with('[') {
        let items: Vec<serde_json::Value> = serde_json::from_str(text)
            .map_err(|e| TripwireError::Serialize(format!("signal array: {}", e)))?;
        return Ok(items.into_iter().map(RawSignal::from).collect());
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RawSignal::from)
        .collect())
}
