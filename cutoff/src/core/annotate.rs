//! Emphasis markup for the time tokens inside free-text cutoff notes.
//!
//! This is substring pattern matching over a bounded, known set of note
//! strings, not a parser; only the first token per note is annotated.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// A time of day, an optional AM/PM marker, and an optional parenthesized
/// zone abbreviation, e.g. `1:45 PM (EST)`.
static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2}\s*(?:AM|PM)?)(\s*\((?:EST|CST|PST)\))?").unwrap()
});

/// Wrap the first time token in `<strong>` markup.
///
/// Text around the token is untouched; notes without a token are returned
/// borrowed. Later tokens in the same note are left as-is.
pub fn annotate(note: &str) -> Cow<'_, str> {
    TIME_TOKEN.replace(note, "<strong>${1}${2}</strong>")
}

/// Annotate string values; anything else passes through unchanged.
///
/// Hosts hand over note lists as loosely-typed JSON, so non-string entries
/// can show up next to the text ones.
pub fn annotate_value(value: &Value) -> Value {
    match value {
        Value::String(note) => Value::String(annotate(note).into_owned()),
        other => other.clone(),
    }
}
