//! HTML escaping.
//!
//! Every substring that originates from the input buffer must pass through
//! [`escape_html`] before it is embedded in output. The only exception is
//! already-generated wrapper markup (code blocks, diagrams), which re-enters
//! the text via placeholder restoration after the generic escaping pass and
//! is therefore never double-escaped.

use std::borrow::Cow;

/// Replace the five HTML-significant characters with entity equivalents.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode HTML entities that leaked in from upstream encoding (used by the
/// diagram sanitizer before any of its own rewriting).
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(s)
}
