//! Raw payload dump for the Dashboard view.

use crate::payload::Payload;

/// Pretty-printed JSON (2-space indent) of the payload, one entry per line.
/// A failed fetch dumps as `null`.
pub fn dump_lines(payload: Option<&Payload>) -> Vec<String> {
    let Some(payload) = payload else {
        return vec!["null".to_string()];
    };
    let text = serde_json::to_string_pretty(payload.raw())
        .unwrap_or_else(|_| payload.raw().to_string());
    text.lines().map(str::to_string).collect()
}
