//! Tolerant JSON decoding for browser script output.

use std::sync::LazyLock;

use regex::Regex;
use rosters_shared::{Result, RosterError};

static LONE_BACKSLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\\])\\([^\\])").expect("valid regex"));

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*\])").expect("valid regex"));

/// Parse JSON, repairing lone backslashes and trailing commas if strict parsing fails.
pub fn decode_lenient_json(text: &str) -> Result<serde_json::Value> {
    let strict_err = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let repaired = LONE_BACKSLASH_RE.replace_all(text, r"$1\\$2");
    let repaired = TRAILING_COMMA_RE.replace_all(&repaired, "$1");

    serde_json::from_str(&repaired).map_err(|e| {
        RosterError::parse(format!(
            "invalid JSON ({strict_err}), still invalid after repair: {e}"
        ))
    })
}
