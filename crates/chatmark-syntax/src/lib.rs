//! Tokenizers and language detection for code blocks embedded in assistant
//! chat output.
//!
//! Two dialects are supported: BSL (the 1C:Enterprise scripting language,
//! with bilingual Russian/English keyword sets) and XML. Both tokenizers are
//! total functions from source text to classified [`Span`]s: they never
//! fail, and every input character lands in exactly one span. This crate
//! produces no markup; rendering spans to HTML is the engine's job.

pub mod bsl;
pub mod detect;
pub mod folding;
pub mod span;
pub mod xml;

pub use detect::{detect, looks_like_bsl, looks_like_xml};
pub use folding::{FoldBlock, FoldKind, apply_fold_state, fold_blocks};
pub use span::{HighlightClass, Span};

/// An embedded language this crate can tokenize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Bsl,
    Xml,
}

impl Language {
    /// Resolve an explicit fence tag. Accepts the upstream model's known
    /// spellings, including Cyrillic ones; an explicit tag always
    /// short-circuits heuristic detection.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "bsl" | "1c" | "1с" | "1s" | "onec" | "бсл" => Some(Language::Bsl),
            "xml" | "хмл" | "xsd" | "xslt" => Some(Language::Xml),
            _ => None,
        }
    }

    /// Canonical tag, used in the rendered `lang-…` CSS class.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Bsl => "bsl",
            Language::Xml => "xml",
        }
    }
}

/// Tokenize `code` as the given language.
pub fn tokenize(code: &str, language: Language) -> Vec<Span> {
    match language {
        Language::Bsl => bsl::tokenize(code),
        Language::Xml => xml::tokenize(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_resolution() {
        assert_eq!(Language::from_tag("bsl"), Some(Language::Bsl));
        assert_eq!(Language::from_tag("1C"), Some(Language::Bsl));
        assert_eq!(Language::from_tag(" XML "), Some(Language::Xml));
        assert_eq!(Language::from_tag("python"), None);
    }

    #[test]
    fn cyrillic_tags_resolve() {
        assert_eq!(Language::from_tag("бсл"), Some(Language::Bsl));
        // `1с` with a Cyrillic с, as the upstream model sometimes emits.
        assert_eq!(Language::from_tag("1с"), Some(Language::Bsl));
        assert_eq!(Language::from_tag("хмл"), Some(Language::Xml));
    }
}
