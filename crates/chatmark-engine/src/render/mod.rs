//! Rendering orchestrator.
//!
//! One call in, one HTML string out. Every invocation reprocesses the whole
//! accumulated buffer from scratch (streaming updates hand the pipeline the
//! full text so far, never a delta) through a fixed stage chain:
//!
//! 1. strip marker-alphabet bytes from untrusted input
//! 2. normalize malformed upstream fence spellings
//! 3. extract diagram fences → placeholder (sanitize, render or defer)
//! 4. extract code fences → placeholder (tokenizer dispatch / detection)
//! 5. extract inline code → placeholder
//! 6. escape everything that remains
//! 7. block and inline Markdown rules, paragraph wrapping; generated
//!    link anchors are parked in the same store as they are built
//! 8. restore placeholders
//!
//! Later stages must never see the interior of earlier-extracted regions,
//! which is why the order is fixed.

pub mod blocks;
pub mod inline;

use std::sync::LazyLock;

use regex::Regex;

use chatmark_syntax::{Language, Span};

use crate::diagram::DiagramRenderer;
use crate::escape::escape_html;
use crate::mermaid;
use crate::normalize::normalize_fences;
use crate::options::RenderOptions;
use crate::placeholder::{Extractions, PlaceholderKind};

static DIAGRAM_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:mermaid|диаграмма)[ \t]*\r?\n(.*?)\r?\n?```").unwrap()
});
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([\w#+.-]*)[ \t]*\r?\n(.*?)\r?\n?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Markdown-to-HTML renderer. Cheap to construct; holds no state across
/// calls. A diagram renderer, when used, is wired once at construction.
pub struct Renderer<'a> {
    options: RenderOptions,
    diagrams: Option<&'a dyn DiagramRenderer>,
}

impl<'a> Renderer<'a> {
    pub fn new(options: RenderOptions) -> Self {
        Renderer {
            options,
            diagrams: None,
        }
    }

    pub fn with_diagram_renderer(mut self, renderer: &'a dyn DiagramRenderer) -> Self {
        self.diagrams = Some(renderer);
        self
    }

    /// Render the full accumulated buffer to HTML. Total: malformed input
    /// degrades to escaped text, never to an error or panic.
    pub fn render(&self, text: &str) -> String {
        let text = Extractions::strip_markers(text);
        let text = normalize_fences(&text);

        let mut ex = Extractions::new();
        let text = if self.options.diagrams {
            ex.extract(&text, &DIAGRAM_FENCE, PlaceholderKind::Diagram, |caps| {
                self.diagram_html(&caps[1])
            })
        } else {
            text
        };
        let autodetect = self.options.autodetect;
        let text = ex.extract(&text, &CODE_FENCE, PlaceholderKind::CodeBlock, |caps| {
            code_block_html(&caps[1], &caps[2], autodetect)
        });
        let text = ex.extract(&text, &INLINE_CODE, PlaceholderKind::InlineCode, |caps| {
            format!("<code>{}</code>", escape_html(&caps[1]))
        });

        let text = escape_html(&text);
        let text = blocks::rewrite(&text, &mut ex);
        ex.restore(&text)
    }

    fn diagram_html(&self, source: &str) -> String {
        let sanitized = mermaid::sanitize(source);
        match self.diagrams {
            None => format!("<div class=\"mermaid\">{}</div>", escape_html(&sanitized)),
            Some(renderer) => match renderer.render(&sanitized) {
                Ok(markup) => format!("<div class=\"diagram\">{markup}</div>"),
                Err(err) => format!(
                    "<div class=\"diagram-error\"><p>{}</p><pre>{}</pre><pre>{}</pre></div>",
                    escape_html(&err.to_string()),
                    escape_html(source),
                    escape_html(&sanitized),
                ),
            },
        }
    }
}

/// Render with default options and no diagram renderer.
pub fn render_markdown(text: &str) -> String {
    Renderer::new(RenderOptions::default()).render(text)
}

/// Highlight one code string to span markup. A forced language always
/// highlights; with `None` the detector runs when `autodetect` is set.
/// Returns `None` when no language claims the code (or the code is empty),
/// in which case the caller should emit plain escaped text.
pub fn highlight(code: &str, language: Option<Language>, autodetect: bool) -> Option<String> {
    if code.is_empty() {
        return None;
    }
    let language = language.or_else(|| {
        if autodetect {
            chatmark_syntax::detect(code)
        } else {
            None
        }
    })?;
    Some(spans_to_html(&chatmark_syntax::tokenize(code, language)))
}

fn code_block_html(tag: &str, code: &str, autodetect: bool) -> String {
    let language = if tag.is_empty() {
        if autodetect {
            chatmark_syntax::detect(code)
        } else {
            None
        }
    } else {
        Language::from_tag(tag)
    };
    match language {
        Some(language) => format!(
            "<pre><code class=\"lang-{}\">{}</code></pre>",
            language.tag(),
            highlight(code, Some(language), false).unwrap_or_default()
        ),
        None => {
            let class = if tag.is_empty() {
                String::new()
            } else {
                format!(" class=\"lang-{}\"", escape_html(tag))
            };
            format!("<pre><code{class}>{}</code></pre>", escape_html(code))
        }
    }
}

fn spans_to_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span.class {
            Some(class) => {
                out.push_str("<span class=\"");
                out.push_str(class.css_class());
                out.push_str("\">");
                out.push_str(&escape_html(&span.text));
                out.push_str("</span>");
            }
            None => out.push_str(&escape_html(&span.text)),
        }
    }
    out
}
