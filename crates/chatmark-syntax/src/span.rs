//! # Spans - Classified Runs of Source Text
//!
//! A [`Span`] is the atomic output unit of every tokenizer in this crate:
//! a contiguous run of source text plus an optional highlight class.
//!
//! ## The Lossless Guarantee
//!
//! The most important property of every tokenizer here is that **every
//! character of the input appears in exactly one span**. Nothing is skipped
//! or discarded, so concatenating span texts reproduces the input:
//!
//! ```
//! use chatmark_syntax::{Language, tokenize};
//!
//! let input = "Процедура Тест() КонецПроцедуры";
//! let spans = tokenize(input, Language::Bsl);
//!
//! let reconstructed: String = spans.iter().map(|s| s.text.as_str()).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! A `class` of `None` means "emit as escaped literal text with no wrapping
//! element". Rendering spans to HTML is the engine crate's job; this crate
//! never produces markup.

/// Highlight class assigned to a span. Each variant maps to one CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    // BSL
    Keyword,
    Str,
    Date,
    Comment,
    Preproc,
    Attr,
    Number,
    Type,
    Builtin,
    Operator,
    // XML
    XmlDecl,
    XmlPi,
    XmlComment,
    XmlCdata,
    XmlDoctype,
    XmlTag,
    XmlNsTag,
    XmlAttrName,
    XmlAttrValue,
    XmlEntity,
}

impl HighlightClass {
    /// CSS class name emitted by the engine for this span class.
    pub fn css_class(self) -> &'static str {
        match self {
            HighlightClass::Keyword => "bsl-keyword",
            HighlightClass::Str => "bsl-string",
            HighlightClass::Date => "bsl-date",
            HighlightClass::Comment => "bsl-comment",
            HighlightClass::Preproc => "bsl-preproc",
            HighlightClass::Attr => "bsl-attr",
            HighlightClass::Number => "bsl-number",
            HighlightClass::Type => "bsl-type",
            HighlightClass::Builtin => "bsl-builtin",
            HighlightClass::Operator => "bsl-operator",
            HighlightClass::XmlDecl => "xml-decl",
            HighlightClass::XmlPi => "xml-pi",
            HighlightClass::XmlComment => "xml-comment",
            HighlightClass::XmlCdata => "xml-cdata",
            HighlightClass::XmlDoctype => "xml-doctype",
            HighlightClass::XmlTag => "xml-tag",
            HighlightClass::XmlNsTag => "xml-tag-ns",
            HighlightClass::XmlAttrName => "xml-attr-name",
            HighlightClass::XmlAttrValue => "xml-attr-value",
            HighlightClass::XmlEntity => "xml-entity",
        }
    }
}

/// A classified, contiguous run of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub class: Option<HighlightClass>,
    pub text: String,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            class: None,
            text: text.into(),
        }
    }

    pub fn classed(class: HighlightClass, text: impl Into<String>) -> Self {
        Span {
            class: Some(class),
            text: text.into(),
        }
    }
}

/// Accumulates spans, grouping consecutive unclassified characters into a
/// single plain span so tokenizers don't emit one span per literal character.
#[derive(Debug, Default)]
pub(crate) struct SpanBuilder {
    spans: Vec<Span>,
    plain: String,
}

impl SpanBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn plain_char(&mut self, c: char) {
        self.plain.push(c);
    }

    pub(crate) fn plain_str(&mut self, s: &str) {
        self.plain.push_str(s);
    }

    pub(crate) fn push(&mut self, class: HighlightClass, text: impl Into<String>) {
        self.flush();
        self.spans.push(Span::classed(class, text));
    }

    pub(crate) fn finish(mut self) -> Vec<Span> {
        self.flush();
        self.spans
    }

    fn flush(&mut self) {
        if !self.plain.is_empty() {
            self.spans.push(Span::plain(std::mem::take(&mut self.plain)));
        }
    }
}
