//! Block-level Markdown rules and paragraph wrapping.
//!
//! Runs on escaped text with code, diagrams and inline code already pulled
//! out into placeholder markers, so nothing here can touch extracted
//! content. Order matters: rules that consume whole lines (hr, blockquote,
//! headings) run before inline rules, lists and tables run on the result,
//! and paragraph wrapping is last.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::inline;
use crate::placeholder::Extractions;

static HR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]+(.+)$").unwrap());
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(?:([-*+])|(\d{1,9})\.)[ \t]+(.+)$").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n+").unwrap());

/// Apply every block and inline rule to escaped text. Link anchors built
/// here are parked in `ex` so later rules never see their markup.
pub fn rewrite(text: &str, ex: &mut Extractions) -> String {
    let text = HR.replace_all(text, "<hr>");
    let text = blockquotes(&text);
    let text = headings(&text);
    let text = inline::links(&text, ex);
    let text = inline::autolinks(&text, ex);
    let text = inline::strikethrough(&text);
    let text = inline::bold(&text);
    let text = inline::italic(&text);
    let text = lists(&text);
    let text = tables(&text);
    wrap_paragraphs(&text)
}

/// Consecutive `>`-prefixed lines (escaped to `&gt;`) collapse into one
/// blockquote with `<br>` joins.
fn blockquotes(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut quote: Vec<String> = Vec::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("&gt;") {
            quote.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
        } else {
            flush_quote(&mut out, &mut quote);
            out.push(line.to_string());
        }
    }
    flush_quote(&mut out, &mut quote);
    out.join("\n")
}

fn flush_quote(out: &mut Vec<String>, quote: &mut Vec<String>) {
    if !quote.is_empty() {
        out.push(format!("<blockquote>{}</blockquote>", quote.join("<br>")));
        quote.clear();
    }
}

fn headings(text: &str) -> String {
    HEADING
        .replace_all(text, |caps: &Captures<'_>| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", caps[2].trim_end())
        })
        .into_owned()
}

struct ListItem {
    indent: usize,
    ordered: bool,
    content: String,
}

fn parse_item(line: &str) -> Option<ListItem> {
    let caps = LIST_ITEM.captures(line)?;
    // Tabs count as four columns for nesting purposes.
    let indent = caps[1].chars().map(|c| if c == '\t' { 4 } else { 1 }).sum();
    Some(ListItem {
        indent,
        ordered: caps.get(3).is_some(),
        content: caps[4].to_string(),
    })
}

/// Runs of consecutive list-item lines become nested `<ul>`/`<ol>` trees.
/// A non-item line (including a blank one) terminates the run.
fn lists(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if let Some(first) = parse_item(lines[i]) {
            let mut items = vec![first];
            let mut j = i + 1;
            while j < lines.len() {
                match parse_item(lines[j]) {
                    Some(item) => {
                        items.push(item);
                        j += 1;
                    }
                    None => break,
                }
            }
            out.push(build_list(&items));
            i = j;
        } else {
            out.push(lines[i].to_string());
            i += 1;
        }
    }
    out.join("\n")
}

/// Build one list level. The first item's indent sets the level; a strictly
/// deeper item opens a nested list inside the preceding `<li>`.
fn build_list(items: &[ListItem]) -> String {
    let level = items[0].indent;
    let tag = if items[0].ordered { "ol" } else { "ul" };
    let mut html = format!("<{tag}>");
    let mut i = 0;
    while i < items.len() {
        let item = &items[i];
        let mut li = item.content.clone();
        let mut j = i + 1;
        while j < items.len() && items[j].indent > level {
            j += 1;
        }
        if j > i + 1 {
            li.push_str(&build_list(&items[i + 1..j]));
        }
        html.push_str("<li>");
        html.push_str(&li);
        html.push_str("</li>");
        i = j;
    }
    html.push_str(&format!("</{tag}>"));
    html
}

fn is_separator_row(line: &str) -> bool {
    if !line.contains('|') {
        return false;
    }
    let cells = split_row(line);
    !cells.is_empty()
        && cells.iter().all(|c| {
            let c = c.trim();
            let body = c.trim_matches(':');
            !body.is_empty() && body.chars().all(|ch| ch == '-')
        })
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|c| c.trim().to_string()).collect()
}

fn parse_alignments(line: &str) -> Vec<Option<&'static str>> {
    split_row(line)
        .iter()
        .map(|c| {
            let starts = c.starts_with(':');
            let ends = c.ends_with(':');
            match (starts, ends) {
                (true, true) => Some("center"),
                (false, true) => Some("right"),
                (true, false) => Some("left"),
                (false, false) => None,
            }
        })
        .collect()
}

/// Pipe tables: a header row followed by a `---`/`:---:` separator row. A
/// header whose cell count disagrees with the separator stays literal text.
fn tables(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].contains('|') && i + 1 < lines.len() && is_separator_row(lines[i + 1]) {
            let headers = split_row(lines[i]);
            let aligns = parse_alignments(lines[i + 1]);
            if !headers.is_empty() && headers.len() == aligns.len() {
                let mut rows: Vec<Vec<String>> = Vec::new();
                let mut j = i + 2;
                while j < lines.len() && lines[j].contains('|') {
                    rows.push(split_row(lines[j]));
                    j += 1;
                }
                out.push(render_table(&headers, &aligns, &rows));
                i = j;
                continue;
            }
        }
        out.push(lines[i].to_string());
        i += 1;
    }
    out.join("\n")
}

fn render_table(headers: &[String], aligns: &[Option<&str>], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table><thead><tr>");
    for (h, a) in headers.iter().zip(aligns) {
        html.push_str(&cell("th", h, *a));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for (k, a) in aligns.iter().enumerate() {
            let content = row.get(k).map(String::as_str).unwrap_or("");
            html.push_str(&cell("td", content, *a));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn cell(tag: &str, content: &str, align: Option<&str>) -> String {
    match align {
        Some(a) => format!("<{tag} align=\"{a}\">{content}</{tag}>"),
        None => format!("<{tag}>{content}</{tag}>"),
    }
}

const BLOCK_TAGS: &[&str] = &[
    "<h1", "<h2", "<h3", "<h4", "<h5", "<h6", "<ul", "<ol", "<pre", "<blockquote", "<table",
    "<hr", "<div", "<p",
];

fn is_block_line(line: &str) -> bool {
    let t = line.trim_start();
    BLOCK_TAGS.iter().any(|tag| t.starts_with(tag)) || Extractions::is_block_marker(t)
}

/// Blank-line-separated runs become `<p>` with `<br>` joins. Lines already
/// holding block markup (or a block-level placeholder) are passed through
/// between paragraphs rather than wrapped.
fn wrap_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for run in BLANK_RUN.split(text) {
        let run = run.trim_matches('\n');
        if run.trim().is_empty() {
            continue;
        }
        let mut para: Vec<&str> = Vec::new();
        for line in run.lines() {
            if is_block_line(line) {
                flush_para(&mut out, &mut para);
                out.push(line.trim_start().to_string());
            } else {
                para.push(line);
            }
        }
        flush_para(&mut out, &mut para);
    }
    out.join("\n")
}

fn flush_para(out: &mut Vec<String>, para: &mut Vec<&str>) {
    if !para.is_empty() {
        out.push(format!("<p>{}</p>", para.join("<br>")));
        para.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite(text: &str) -> String {
        let mut ex = Extractions::new();
        let marked = super::rewrite(text, &mut ex);
        ex.restore(&marked)
    }

    #[test]
    fn horizontal_rule_variants() {
        assert_eq!(rewrite("до\n\n---\n\nпосле"), "<p>до</p>\n<hr>\n<p>после</p>");
    }

    #[test]
    fn heading_levels() {
        assert_eq!(rewrite("## Раздел"), "<h2>Раздел</h2>");
        assert_eq!(rewrite("###### низ"), "<h6>низ</h6>");
        // Seven hashes exceed the heading range.
        assert_eq!(rewrite("####### нет"), "<p>####### нет</p>");
    }

    #[test]
    fn blockquote_joins_consecutive_lines() {
        assert_eq!(
            rewrite("&gt; раз\n&gt; два"),
            "<blockquote>раз<br>два</blockquote>"
        );
    }

    #[test]
    fn flat_unordered_list() {
        assert_eq!(
            rewrite("- а\n- б"),
            "<ul><li>а</li><li>б</li></ul>"
        );
    }

    #[test]
    fn ordered_list_with_nested_bullets() {
        assert_eq!(
            rewrite("1. первый\n   - вложен\n2. второй"),
            "<ol><li>первый<ul><li>вложен</li></ul></li><li>второй</li></ol>"
        );
    }

    #[test]
    fn nesting_kind_follows_nested_marker() {
        assert_eq!(
            rewrite("- верх\n  1. раз\n  2. два"),
            "<ul><li>верх<ol><li>раз</li><li>два</li></ol></li></ul>"
        );
    }

    #[test]
    fn table_with_alignment() {
        let input = "| а | б |\n|:---|---:|\n| 1 | 2 |";
        assert_eq!(
            rewrite(input),
            "<table><thead><tr><th align=\"left\">а</th><th align=\"right\">б</th></tr></thead>\
             <tbody><tr><td align=\"left\">1</td><td align=\"right\">2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn short_row_padded_with_empty_cells() {
        let input = "| а | б |\n|---|---|\n| 1 |";
        let html = rewrite(input);
        assert!(html.contains("<td>1</td><td></td>"));
    }

    #[test]
    fn pipe_line_without_separator_is_not_a_table() {
        assert_eq!(rewrite("а | б"), "<p>а | б</p>");
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            rewrite("раз\nдва\n\nтри"),
            "<p>раз<br>два</p>\n<p>три</p>"
        );
    }
}
