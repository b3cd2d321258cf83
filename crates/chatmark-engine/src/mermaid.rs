//! Mermaid source sanitizer.
//!
//! The diagram renderer's grammar cannot tolerate certain characters inside
//! node-label text, and the upstream model produces them constantly
//! (brackets in array indexing, comparison operators, call parentheses,
//! dotted names). This module rewrites diagram source best-effort so the
//! renderer parses it instead of throwing. It is deliberately not a Mermaid
//! parser: it never assumes well-formed input, and when a matching close
//! delimiter cannot be found before end of line the construct is left
//! untouched.
//!
//! Rules, applied in order:
//! 1. decode HTML entities that leaked in from upstream encoding;
//! 2. strip quote characters from lines carrying an edge-arrow token;
//! 3. inside brace-delimited nodes: drop `<br>` markup, collapse
//!    `name[index]` to `name_index` and `name()` to `name`, and swap
//!    comparison operators for Unicode lookalikes;
//! 4. globally remove semicolons and empty call parentheses, and join
//!    `identifier.identifier` with underscores (dots are invalid in node
//!    identifiers);
//! 5. for each node definition (`identifier` + `[`, `{` or `(`), keep only
//!    the outermost delimiter pair as real syntax: nested brackets become
//!    fullwidth lookalikes and interior double quotes become the double
//!    prime `″`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::decode_entities;

static ARROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-->|---|-\.->|==>").unwrap());
static BRACE_NODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}\n]*)\}").unwrap());
static BR_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static INDEXING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\p{L}\d_]+)\[([^\[\]\n]*)\]").unwrap());
static EMPTY_CALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\p{L}\d_]+)\(\)").unwrap());
static DOT_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L}[\p{L}\d_]*)\.(\p{L})").unwrap());

/// Best-effort rewrite of diagram source before it reaches the renderer.
pub fn sanitize(code: &str) -> String {
    let decoded = decode_entities(code);

    // Edge labels must not contain quotes.
    let dequoted: Vec<String> = decoded
        .lines()
        .map(|l| {
            if ARROW.is_match(l) {
                l.replace(['"', '\''], "")
            } else {
                l.to_string()
            }
        })
        .collect();
    let s = dequoted.join("\n");

    let s = BRACE_NODE
        .replace_all(&s, |caps: &Captures<'_>| {
            format!("{{{}}}", clean_brace_interior(&caps[1]))
        })
        .into_owned();

    let s = s.replace(';', "");
    let mut s = EMPTY_CALL.replace_all(&s, "$1").into_owned();
    while DOT_ACCESS.is_match(&s) {
        s = DOT_ACCESS.replace_all(&s, "${1}_${2}").into_owned();
    }

    s.lines()
        .map(rewrite_node_brackets)
        .collect::<Vec<_>>()
        .join("\n")
}

fn clean_brace_interior(interior: &str) -> String {
    let s = BR_TAG.replace_all(interior, " ");
    let s = INDEXING.replace_all(&s, "${1}_${2}");
    let s = EMPTY_CALL.replace_all(&s, "$1");
    s.replace("<=", "≤")
        .replace(">=", "≥")
        .replace("!=", "≠")
        .replace("==", "＝")
        .replace('<', "‹")
        .replace('>', "›")
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn closer_for(opener: char) -> Option<char> {
    match opener {
        '[' => Some(']'),
        '{' => Some('}'),
        '(' => Some(')'),
        _ => None,
    }
}

fn lookalike(c: char) -> char {
    match c {
        '[' => '［',
        ']' => '］',
        '{' => '｛',
        '}' => '｝',
        '(' => '（',
        ')' => '）',
        '"' => '″',
        _ => c,
    }
}

/// Scan one line for node definitions and neutralize delimiters nested
/// inside each node's label.
fn rewrite_node_brackets(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;
    while i < chars.len() {
        if is_ident_char(chars[i]) {
            let start = i;
            while i < chars.len() && is_ident_char(chars[i]) {
                i += 1;
            }
            out.extend(chars[start..i].iter());
            if i < chars.len()
                && let Some(closer) = closer_for(chars[i])
                && let Some(consumed) = rewrite_node(&chars[i..], chars[i], closer, &mut out)
            {
                i += consumed;
            }
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Consume one delimited node label starting at `chars[0]` (the opener) and
/// append the rewritten form to `out`. Doubled delimiters (`((…))`, `[[…]]`,
/// `{{…}}`) are Mermaid shapes and both pairs stay real syntax. Returns the
/// number of characters consumed, or `None` when no matching close exists;
/// the caller then leaves the construct untouched.
fn rewrite_node(chars: &[char], opener: char, closer: char, out: &mut String) -> Option<usize> {
    let doubled = chars.get(1) == Some(&opener);
    if doubled {
        let mut depth = 1u32;
        let mut j = 2;
        let mut interior = String::new();
        let end = loop {
            if j >= chars.len() {
                return None;
            }
            let c = chars[j];
            if c == closer && depth == 1 && chars.get(j + 1) == Some(&closer) {
                break j;
            }
            if c == opener {
                depth += 1;
            } else if c == closer && depth > 1 {
                depth -= 1;
            }
            interior.push(lookalike(c));
            j += 1;
        };
        out.push(opener);
        out.push(opener);
        out.push_str(&interior);
        out.push(closer);
        out.push(closer);
        Some(end + 2)
    } else {
        let mut depth = 1u32;
        let mut j = 1;
        let end = loop {
            if j >= chars.len() {
                return None;
            }
            let c = chars[j];
            if c == opener {
                depth += 1;
            } else if c == closer {
                depth -= 1;
                if depth == 0 {
                    break j;
                }
            }
            j += 1;
        };
        out.push(opener);
        for &c in &chars[1..end] {
            out.push(lookalike(c));
        }
        out.push(closer);
        Some(end + 1)
    }
}
