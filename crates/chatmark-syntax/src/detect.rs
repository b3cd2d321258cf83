//! Heuristic language detection for unlabeled code fences.
//!
//! Each language has a fixed list of regex triggers with integer weights:
//! strong structural markers (a declaration pair, an XML declaration) score
//! 2–3, weak markers (a lone comment, one attribute) score 1. A text is
//! claimed when its accumulated score reaches 2, so a single weak signal
//! never misclassifies prose but two independent weak signals do combine.
//!
//! `detect` tries BSL first, then XML; the first highlighter to claim a
//! block keeps it, the other never re-scans it. Explicitly tagged fences
//! bypass detection entirely.

use std::sync::LazyLock;

use regex::Regex;

use crate::Language;

const CLAIM_THRESHOLD: u32 = 2;

struct Trigger {
    re: Regex,
    weight: u32,
}

fn trigger(pattern: &str, weight: u32) -> Trigger {
    Trigger {
        re: Regex::new(pattern).expect("trigger pattern must compile"),
        weight,
    }
}

static BSL_TRIGGERS: LazyLock<Vec<Trigger>> = LazyLock::new(|| {
    vec![
        trigger(
            r"(?i)\b(процедура|функция|procedure|function)\s+[\wа-яё]+\s*\(",
            3,
        ),
        trigger(
            r"(?i)\b(конецпроцедуры|конецфункции|endprocedure|endfunction)\b",
            3,
        ),
        trigger(r"(?i)\b(если|if)\b.+\b(тогда|then)\b", 2),
        trigger(r"(?i)\b(конецесли|конеццикла|endif|enddo)\b", 2),
        trigger(r"(?im)^\s*(перем|var)\s", 2),
        trigger(r"(?i)&(насервере|наклиенте|atserver|atclient)\b", 2),
        trigger(r"(?i)\b(новый|new)\s+[а-яёa-z_]", 1),
        trigger(r"(?m)^\s*//", 1),
        trigger(r"(?m);\s*$", 1),
    ]
});

static XML_TRIGGERS: LazyLock<Vec<Trigger>> = LazyLock::new(|| {
    vec![
        trigger(r"(?i)^\s*<\?xml", 3),
        trigger(r"(?s)<[A-Za-z_][\w:.-]*[^>]*>.*</[A-Za-z_][\w:.-]*\s*>", 2),
        trigger(r"<!\[CDATA\[", 2),
        trigger(r"<!DOCTYPE", 2),
        trigger(r"<!--", 1),
        trigger(r#"[\w:.-]+\s*=\s*"[^"]*""#, 1),
        trigger(r"/>", 1),
    ]
});

fn score(text: &str, triggers: &[Trigger]) -> u32 {
    triggers
        .iter()
        .filter(|t| t.re.is_match(text))
        .map(|t| t.weight)
        .sum()
}

/// Weighted-trigger score says this looks like BSL source.
pub fn looks_like_bsl(text: &str) -> bool {
    score(text, &BSL_TRIGGERS) >= CLAIM_THRESHOLD
}

/// Weighted-trigger score says this looks like XML source.
pub fn looks_like_xml(text: &str) -> bool {
    score(text, &XML_TRIGGERS) >= CLAIM_THRESHOLD
}

/// Detect the language of an unlabeled block. First claim wins.
pub fn detect(text: &str) -> Option<Language> {
    if text.trim().is_empty() {
        return None;
    }
    if looks_like_bsl(text) {
        Some(Language::Bsl)
    } else if looks_like_xml(text) {
        Some(Language::Xml)
    } else {
        None
    }
}
