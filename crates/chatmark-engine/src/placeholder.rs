//! Extract-and-restore substitution primitive.
//!
//! Multi-pass rewriting needs regions (code fences, diagrams, inline code,
//! generated link anchors) taken out of the buffer before later rules run,
//! then spliced back in afterwards. Each extracted region is replaced by an
//! opaque marker built from a `\u{0001}` delimiter, a kind letter and a
//! per-render monotonically increasing index.
//!
//! The marker alphabet is guaranteed absent from the buffer because
//! [`strip_markers`] removes `\u{0001}` from the input before any extraction
//! happens, and escaped HTML output can never reintroduce a control
//! character. Restoration is therefore an unambiguous literal substring
//! replacement. Stored HTML may embed markers minted before it (a link
//! label can carry an inline-code marker) but never markers minted after
//! it, so restoring in reverse insertion order resolves outer regions
//! first and every marker they carry in afterwards.

use regex::{Captures, Regex};

const MARKER: char = '\u{0001}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    CodeBlock,
    Diagram,
    InlineCode,
    Link,
}

impl PlaceholderKind {
    fn letter(self) -> char {
        match self {
            PlaceholderKind::CodeBlock => 'C',
            PlaceholderKind::Diagram => 'D',
            PlaceholderKind::InlineCode => 'I',
            PlaceholderKind::Link => 'L',
        }
    }
}

/// Per-render store of extracted regions. Created fresh for every render
/// call; nothing survives across calls.
#[derive(Debug, Default)]
pub struct Extractions {
    stored: Vec<(String, String)>,
    next_index: usize,
}

impl Extractions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the marker delimiter from untrusted input so minted markers
    /// cannot collide with buffer text. Must run before the first `extract`.
    pub fn strip_markers(text: &str) -> String {
        if text.contains(MARKER) {
            text.replace(MARKER, "")
        } else {
            text.to_string()
        }
    }

    /// Replace every non-overlapping match of `pattern`, left to right, with
    /// a freshly minted placeholder; `to_html` supplies the stored
    /// replacement for each match.
    pub fn extract(
        &mut self,
        text: &str,
        pattern: &Regex,
        kind: PlaceholderKind,
        mut to_html: impl FnMut(&Captures<'_>) -> String,
    ) -> String {
        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let html = to_html(caps);
                self.insert(kind, html)
            })
            .into_owned()
    }

    /// Store one pre-built HTML region and return its freshly minted marker,
    /// for callers that locate regions without a regex pass.
    pub fn insert(&mut self, kind: PlaceholderKind, html: String) -> String {
        let marker = self.mint(kind);
        self.stored.push((marker.clone(), html));
        marker
    }

    fn mint(&mut self, kind: PlaceholderKind) -> String {
        let index = self.next_index;
        self.next_index += 1;
        format!("{MARKER}{}{index}{MARKER}", kind.letter())
    }

    /// Splice stored HTML back over the markers, newest first. Stored HTML
    /// can only embed markers older than itself, so the reverse walk leaves
    /// no marker unresolved.
    pub fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (marker, html) in self.stored.iter().rev() {
            out = out.replace(marker.as_str(), html);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    /// True when `line` is a marker for a block-level region (code block or
    /// diagram), which paragraph wrapping must leave on its own line.
    pub fn is_block_marker(line: &str) -> bool {
        let t = line.trim();
        let mut chars = t.chars();
        chars.next() == Some(MARKER)
            && matches!(chars.next(), Some('C') | Some('D'))
            && t.ends_with(MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::LazyLock;

    static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bword\b").unwrap());

    #[test]
    fn extract_and_restore_round_trip() {
        let mut ex = Extractions::new();
        let text = ex.extract("a word b word c", &WORD, PlaceholderKind::CodeBlock, |_| {
            "<x/>".to_string()
        });
        assert!(!text.contains("word"));
        assert_eq!(ex.restore(&text), "a <x/> b <x/> c");
    }

    #[test]
    fn markers_are_pairwise_distinct() {
        let mut ex = Extractions::new();
        let text = ex.extract("word word word", &WORD, PlaceholderKind::InlineCode, |_| {
            String::new()
        });
        let markers: Vec<&str> = text.split(' ').collect();
        assert_eq!(markers.len(), 3);
        assert_ne!(markers[0], markers[1]);
        assert_ne!(markers[1], markers[2]);
        assert_ne!(markers[0], markers[2]);
    }

    #[test]
    fn index_is_shared_across_kinds() {
        let mut ex = Extractions::new();
        let a = ex.mint(PlaceholderKind::CodeBlock);
        let b = ex.mint(PlaceholderKind::Diagram);
        assert_eq!(a, "\u{1}C0\u{1}");
        assert_eq!(b, "\u{1}D1\u{1}");
    }

    #[test]
    fn restore_resolves_markers_embedded_in_later_regions() {
        let mut ex = Extractions::new();
        let inner = ex.insert(PlaceholderKind::InlineCode, "<code>x</code>".to_string());
        let outer = ex.insert(PlaceholderKind::Link, format!("<a>{inner}</a>"));
        assert_eq!(ex.restore(&outer), "<a><code>x</code></a>");
    }

    #[test]
    fn strip_markers_removes_delimiter() {
        assert_eq!(Extractions::strip_markers("a\u{1}C0\u{1}b"), "aC0b");
        assert_eq!(Extractions::strip_markers("plain"), "plain");
    }

    #[test]
    fn block_marker_detection() {
        assert!(Extractions::is_block_marker("\u{1}C0\u{1}"));
        assert!(Extractions::is_block_marker("  \u{1}D12\u{1}"));
        assert!(!Extractions::is_block_marker("\u{1}I3\u{1}"));
        assert!(!Extractions::is_block_marker("text"));
    }
}
