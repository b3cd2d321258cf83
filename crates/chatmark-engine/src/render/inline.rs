//! Inline Markdown rules. All of these run on already-escaped text, so the
//! patterns match entity spellings (`&gt;`, `&quot;`) where the raw
//! character would otherwise appear.
//!
//! Generated anchor markup is not left in the stream: `links` and
//! `autolinks` store each `<a>` element in the extraction store and leave
//! an opaque marker behind, so the emphasis rules that run afterwards can
//! never match into attributes like `target="_blank"`. Emphasis inside a
//! link label still works because the label is rewritten before the anchor
//! is stored.

use std::sync::LazyLock;

use regex::Regex;

use crate::placeholder::{Extractions, PlaceholderKind};

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\((https?://[^)\s]+)\)").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s<\x01]+").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~([^~\n]+)~~").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[^\w])_([^_\n]+)_").unwrap());

fn anchor(href: &str, label: &str) -> String {
    format!("<a href=\"{href}\" target=\"_blank\" rel=\"noopener\">{label}</a>")
}

/// `[text](http…)` links, stored as placeholders. Only http and https
/// schemes are linkified; the target always opens in a new context with
/// opener access severed.
pub fn links(text: &str, ex: &mut Extractions) -> String {
    ex.extract(text, &LINK, PlaceholderKind::Link, |caps| {
        let label = strikethrough(&caps[1]);
        let label = bold(&label);
        let label = italic(&label);
        anchor(&caps[2], &label)
    })
}

/// Bare URLs in running text, stored as placeholders. Skips URLs that sit
/// inside raw markup remnants (preceded by a quote, `(` or `=`) and trims
/// trailing punctuation so the link target stays clean. A URL the source
/// wrapped in quote characters arrives here as `&quot;…&quot;` and is
/// still linkified on purpose, with the entity trimmed off the target;
/// the quote-context exclusion is about attribute positions, not prose.
pub fn autolinks(text: &str, ex: &mut Extractions) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in URL.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        last = m.end();
        let prev = text[..m.start()].chars().next_back();
        if matches!(prev, Some('"') | Some('\'') | Some('(') | Some('=')) {
            out.push_str(m.as_str());
            continue;
        }
        let mut url = m.as_str();
        for stop in ["&quot;", "&#39;", "&lt;", "&gt;"] {
            if let Some(pos) = url.find(stop) {
                url = &url[..pos];
            }
        }
        let url = url.trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
        if url.is_empty() {
            out.push_str(m.as_str());
            continue;
        }
        out.push_str(&ex.insert(PlaceholderKind::Link, anchor(url, url)));
        out.push_str(&m.as_str()[url.len()..]);
    }
    out.push_str(&text[last..]);
    out
}

pub fn strikethrough(text: &str) -> String {
    STRIKE.replace_all(text, "<del>${1}</del>").into_owned()
}

pub fn bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>${1}</strong>").into_owned()
}

/// Both emphasis spellings. The underscore form only fires at a word
/// boundary so identifiers like `имя_поля_таблицы` stay intact.
pub fn italic(text: &str) -> String {
    let text = ITALIC_STAR.replace_all(text, "<em>${1}</em>");
    ITALIC_UNDERSCORE
        .replace_all(&text, "${1}<em>${2}</em>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply_links(text: &str) -> String {
        let mut ex = Extractions::new();
        let marked = links(text, &mut ex);
        ex.restore(&marked)
    }

    fn apply_autolinks(text: &str) -> String {
        let mut ex = Extractions::new();
        let marked = autolinks(text, &mut ex);
        ex.restore(&marked)
    }

    #[test]
    fn explicit_link_gets_hardened_anchor() {
        assert_eq!(
            apply_links("см. [докс](https://example.ru/docs)"),
            "см. <a href=\"https://example.ru/docs\" target=\"_blank\" rel=\"noopener\">докс</a>"
        );
    }

    #[test]
    fn non_http_scheme_is_not_linkified() {
        let input = "[x](javascript:alert(1))";
        assert_eq!(apply_links(input), input);
    }

    #[test]
    fn anchor_markup_is_opaque_to_later_rules() {
        // Two links on one line leave no underscores in the stream, so the
        // italic pass that follows cannot pair them across anchors.
        let mut ex = Extractions::new();
        let marked = links("[а](https://x.ru/1) и [б](https://x.ru/2)", &mut ex);
        assert!(!marked.contains('_'));
        let marked = italic(&marked);
        assert_eq!(
            ex.restore(&marked),
            "<a href=\"https://x.ru/1\" target=\"_blank\" rel=\"noopener\">а</a> и \
             <a href=\"https://x.ru/2\" target=\"_blank\" rel=\"noopener\">б</a>"
        );
    }

    #[test]
    fn emphasis_inside_link_label_still_renders() {
        assert_eq!(
            apply_links("[**жирный**](https://x.ru)"),
            "<a href=\"https://x.ru\" target=\"_blank\" rel=\"noopener\"><strong>жирный</strong></a>"
        );
    }

    #[test]
    fn url_as_link_label_does_not_nest_anchors() {
        let mut ex = Extractions::new();
        let marked = links("[https://a.ru](https://a.ru)", &mut ex);
        let marked = autolinks(&marked, &mut ex);
        let html = ex.restore(&marked);
        assert_eq!(
            html,
            "<a href=\"https://a.ru\" target=\"_blank\" rel=\"noopener\">https://a.ru</a>"
        );
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn bare_url_autolinked_with_punctuation_trimmed() {
        assert_eq!(
            apply_autolinks("см. https://example.ru/a, потом"),
            "см. <a href=\"https://example.ru/a\" target=\"_blank\" rel=\"noopener\">https://example.ru/a</a>, потом"
        );
    }

    #[test]
    fn url_inside_raw_markup_remnant_is_left_alone() {
        let input = "<a href=\"https://example.ru\">x</a>";
        assert_eq!(apply_autolinks(input), input);
    }

    #[test]
    fn url_trimmed_at_escaped_quote() {
        assert_eq!(
            apply_autolinks("адрес &quot;https://example.ru&quot; тут"),
            "адрес &quot;<a href=\"https://example.ru\" target=\"_blank\" rel=\"noopener\">https://example.ru</a>&quot; тут"
        );
    }

    #[test]
    fn emphasis_variants() {
        assert_eq!(bold("**жирный**"), "<strong>жирный</strong>");
        assert_eq!(italic("*курсив*"), "<em>курсив</em>");
        assert_eq!(italic("и _это_ тоже"), "и <em>это</em> тоже");
        assert_eq!(strikethrough("~~нет~~"), "<del>нет</del>");
    }

    #[test]
    fn snake_case_identifier_is_not_emphasis() {
        assert_eq!(italic("имя_поля_таблицы"), "имя_поля_таблицы");
    }

    #[test]
    fn lazy_bold_handles_two_runs_per_line() {
        assert_eq!(
            bold("**а** и **б**"),
            "<strong>а</strong> и <strong>б</strong>"
        );
    }
}
