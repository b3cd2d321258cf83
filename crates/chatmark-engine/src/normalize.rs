//! Structural repair of malformed upstream code fences.
//!
//! The streaming source emits a few non-standard fence spellings that must
//! be normalized before extraction:
//! - fence language tags typed with Cyrillic homoglyph letters (`хml`);
//! - stray `<code>` wrapper lines, with or without the closing tag;
//! - fences closed with two backticks instead of three;
//! - a fence still open when the buffer ends mid-stream.

use std::sync::LazyLock;

use regex::Regex;

static CODE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*<code(?:\s[^>\n]*)?>[ \t]*$").unwrap());
static CODE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*</code>[ \t]*$").unwrap());
static DOUBLE_TICK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^``[ \t]*$").unwrap());
static FENCE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```([^\s`]+)[ \t]*$").unwrap());
static FENCE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^```").unwrap());

/// Map a Cyrillic homoglyph to its Latin lookalike. Only letters that are
/// visually identical (or near enough that the model confuses them) are
/// mapped; anything else passes through.
fn latinize(c: char) -> char {
    match c {
        'а' => 'a',
        'е' => 'e',
        'о' => 'o',
        'р' => 'p',
        'с' => 'c',
        'у' => 'y',
        'х' => 'x',
        'к' => 'k',
        'м' => 'm',
        'т' => 't',
        'А' => 'A',
        'Е' => 'E',
        'О' => 'O',
        'Р' => 'P',
        'С' => 'C',
        'У' => 'Y',
        'Х' => 'X',
        'К' => 'K',
        'М' => 'M',
        'Т' => 'T',
        _ => c,
    }
}

/// Normalize fence variants. Runs first, before any extraction.
pub fn normalize_fences(text: &str) -> String {
    let text = CODE_OPEN.replace_all(text, "```");
    let text = CODE_CLOSE.replace_all(&text, "```");
    let text = DOUBLE_TICK.replace_all(&text, "```");
    let mut text = FENCE_TAG
        .replace_all(&text, |caps: &regex::Captures<'_>| {
            let tag: String = caps[1].chars().map(latinize).collect();
            format!("```{tag}")
        })
        .into_owned();

    // Streaming truncation: a fence still open at end of buffer gets closed
    // so extraction always sees balanced fences.
    if FENCE_LINE.find_iter(&text).count() % 2 == 1 {
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str("```");
    }
    text
}
