//! # XML Tokenizer
//!
//! Same shape as the BSL tokenizer: a single scan over the input trying an
//! ordered list of recognizers, with a literal-character fallback that makes
//! the tokenizer total. Priority order:
//!
//! 1. comment (`<!--` … `-->`)
//! 2. CDATA section (`<![CDATA[` … `]]>`)
//! 3. DOCTYPE declaration, scanned with a bracket depth counter so nested
//!    markup declarations are consumed as one unit
//! 4. processing instruction (`<?` … `?>`); the XML declaration `<?xml …?>`
//!    gets its own class
//! 5. element tag: opening, closing or self-closing, namespace-prefixed
//!    names allowed, attribute names and values wrapped independently
//! 6. entity reference (`&name;`, `&#digits;`, `&#xhex;`): recognized only
//!    when the terminating `;` is present, otherwise the `&` is literal
//!
//! Truncated constructs (unclosed comment, CDATA, DOCTYPE, tag) extend to
//! end of input rather than failing.

use crate::span::{HighlightClass, Span, SpanBuilder};

/// Tokenize XML source into spans covering the whole input.
pub fn tokenize(code: &str) -> Vec<Span> {
    let chars: Vec<char> = code.chars().collect();
    let mut b = SpanBuilder::new();
    let mut i = 0usize;

    while i < chars.len() {
        if starts_with(&chars, i, "<!--") {
            let end = find_seq(&chars, i + 4, "-->").map_or(chars.len(), |p| p + 3);
            b.push(HighlightClass::XmlComment, collect(&chars[i..end]));
            i = end;
            continue;
        }
        if starts_with(&chars, i, "<![CDATA[") {
            let end = find_seq(&chars, i + 9, "]]>").map_or(chars.len(), |p| p + 3);
            b.push(HighlightClass::XmlCdata, collect(&chars[i..end]));
            i = end;
            continue;
        }
        if starts_with(&chars, i, "<!DOCTYPE") {
            let end = doctype_end(&chars, i);
            b.push(HighlightClass::XmlDoctype, collect(&chars[i..end]));
            i = end;
            continue;
        }
        if starts_with(&chars, i, "<?") {
            let end = find_seq(&chars, i + 2, "?>").map_or(chars.len(), |p| p + 2);
            let class = if is_xml_declaration(&chars, i) {
                HighlightClass::XmlDecl
            } else {
                HighlightClass::XmlPi
            };
            b.push(class, collect(&chars[i..end]));
            i = end;
            continue;
        }
        if chars[i] == '<' && tag_follows(&chars, i) {
            i = scan_tag(&mut b, &chars, i);
            continue;
        }
        if chars[i] == '&' {
            if let Some(end) = entity_end(&chars, i) {
                b.push(HighlightClass::XmlEntity, collect(&chars[i..end]));
                i = end;
                continue;
            }
        }
        b.plain_char(chars[i]);
        i += 1;
    }

    b.finish()
}

fn is_xml_declaration(chars: &[char], i: usize) -> bool {
    starts_with(chars, i, "<?xml")
        && matches!(chars.get(i + 5), Some(c) if c.is_whitespace() || *c == '?')
}

/// `<` starts a tag only when followed by a name (optionally after `/`).
fn tag_follows(chars: &[char], i: usize) -> bool {
    let mut j = i + 1;
    if chars.get(j) == Some(&'/') {
        j += 1;
    }
    chars.get(j).is_some_and(|c| is_name_start(*c))
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

/// Scan one element tag, emitting the tag name, each attribute name and each
/// attribute value as separate spans. Returns the index after the consumed
/// region. A tag truncated by end of input keeps whatever was emitted.
fn scan_tag(b: &mut SpanBuilder, chars: &[char], start: usize) -> usize {
    let mut j = start + 1;
    if chars.get(j) == Some(&'/') {
        j += 1;
    }
    let name_start = j;
    while j < chars.len() && is_name_char(chars[j]) {
        j += 1;
    }
    let name: String = chars[name_start..j].iter().collect();
    let tag_class = if name.contains(':') {
        HighlightClass::XmlNsTag
    } else {
        HighlightClass::XmlTag
    };
    b.push(tag_class, collect(&chars[start..j]));

    loop {
        let Some(&c) = chars.get(j) else {
            return j;
        };
        if c == '>' {
            b.push(HighlightClass::XmlTag, ">");
            return j + 1;
        }
        if c == '/' && chars.get(j + 1) == Some(&'>') {
            b.push(HighlightClass::XmlTag, "/>");
            return j + 2;
        }
        if c.is_whitespace() {
            b.plain_char(c);
            j += 1;
            continue;
        }
        if is_name_start(c) {
            j = scan_attribute(b, chars, j);
            continue;
        }
        b.plain_char(c);
        j += 1;
    }
}

/// `name (ws)* = (ws)* ("…"|'…')`; a name without `=` is also accepted
/// (boolean-style attribute), and an unterminated value extends to end of
/// input.
fn scan_attribute(b: &mut SpanBuilder, chars: &[char], start: usize) -> usize {
    let mut j = start;
    while j < chars.len() && is_name_char(chars[j]) {
        j += 1;
    }
    b.push(HighlightClass::XmlAttrName, collect(&chars[start..j]));

    let mut k = j;
    while k < chars.len() && chars[k].is_whitespace() {
        k += 1;
    }
    if chars.get(k) != Some(&'=') {
        return j;
    }
    for &ws in &chars[j..k] {
        b.plain_char(ws);
    }
    b.plain_char('=');
    j = k + 1;
    while j < chars.len() && chars[j].is_whitespace() {
        b.plain_char(chars[j]);
        j += 1;
    }
    if let Some(&q) = chars.get(j)
        && (q == '"' || q == '\'')
    {
        let mut v = j + 1;
        while v < chars.len() && chars[v] != q {
            v += 1;
        }
        let end = if v < chars.len() { v + 1 } else { v };
        b.push(HighlightClass::XmlAttrValue, collect(&chars[j..end]));
        return end;
    }
    j
}

/// Depth-counting scan: nested `<` inside the DOCTYPE internal subset are
/// consumed as part of the declaration.
fn doctype_end(chars: &[char], start: usize) -> usize {
    let mut depth = 0i32;
    let mut j = start;
    while j < chars.len() {
        match chars[j] {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }
    chars.len()
}

/// `&name;`, `&#digits;`, `&#xhex;`. Returns `None` when no well-formed terminator
/// is found, in which case the `&` falls through as a literal.
fn entity_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'#') {
        j += 1;
        let hex = matches!(chars.get(j), Some('x') | Some('X'));
        if hex {
            j += 1;
        }
        let digits_start = j;
        while j < chars.len()
            && chars[j].is_ascii_hexdigit()
            && (hex || chars[j].is_ascii_digit())
        {
            j += 1;
        }
        if j == digits_start {
            return None;
        }
    } else {
        let name_start = j;
        while j < chars.len() && chars[j].is_alphanumeric() {
            j += 1;
        }
        if j == name_start {
            return None;
        }
    }
    (chars.get(j) == Some(&';')).then(|| j + 1)
}

fn starts_with(chars: &[char], i: usize, pat: &str) -> bool {
    let pat: Vec<char> = pat.chars().collect();
    chars.len() >= i + pat.len() && chars[i..i + pat.len()] == pat[..]
}

fn find_seq(chars: &[char], from: usize, pat: &str) -> Option<usize> {
    let pat: Vec<char> = pat.chars().collect();
    if pat.is_empty() || chars.len() < pat.len() {
        return None;
    }
    (from..=chars.len() - pat.len()).find(|&p| chars[p..p + pat.len()] == pat[..])
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
