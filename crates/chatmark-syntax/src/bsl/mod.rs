//! # BSL Tokenizer
//!
//! Classifies 1C:Enterprise script (BSL) into highlight spans with a single
//! left-to-right scan, one character of lookahead and no backtracking. At
//! each cursor position an ordered list of recognizers is tried:
//!
//! 1. string/date literal (`"…"` or `'…'`, delimiter escaped by doubling)
//! 2. line comment (`//` to end of line)
//! 3. preprocessor directive (`#` + word characters)
//! 4. compilation attribute (`&` + word characters)
//! 5. number literal (guarded so identifier tails and member chains don't
//!    produce numbers)
//! 6. identifier, classified as keyword / type / builtin / plain
//! 7. multi-character operator (`<=`, `>=`, `<>`), then single-character
//! 8. any other character falls through as literal text
//!
//! The fallback rule makes the tokenizer total: it never fails, and the
//! concatenation of emitted span texts always equals the input.
//!
//! Identifier classification is context-sensitive:
//! - a name immediately preceded by `.` is member access and is never a
//!   keyword, type or builtin, whatever the vocabulary says;
//! - builtins only count in call position (next non-whitespace is `(`);
//! - the word after `Новый`/`New` is a type even outside the vocabulary;
//! - query-language reserved words (`ВЫБРАТЬ`, `SELECT`, …) are keywords
//!   only when spelled all-uppercase, so `Запрос.Выбрать()` stays a method.

mod vocab;

use crate::span::{HighlightClass, Span, SpanBuilder};
use vocab::{BUILTIN_SET, KEYWORD_SET, QUERY_KEYWORD_SET, TYPE_SET};

/// Word characters: Latin, Cyrillic (including Ё/ё), digits, underscore.
fn is_word_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || is_cyrillic(c)
}

fn is_cyrillic(c: char) -> bool {
    ('\u{0410}'..='\u{044F}').contains(&c) || c == 'Ё' || c == 'ё'
}

fn is_all_uppercase(word: &str) -> bool {
    word.chars().any(|c| c.is_uppercase()) && !word.chars().any(|c| c.is_lowercase())
}

/// Tokenize BSL source into spans covering the whole input.
pub fn tokenize(code: &str) -> Vec<Span> {
    let chars: Vec<char> = code.chars().collect();
    let mut b = SpanBuilder::new();
    let mut i = 0usize;
    // Last identifier-like token, with only whitespace between it and the
    // cursor. Drives the `Новый Тип` rule.
    let mut prev_word: Option<String> = None;

    while i < chars.len() {
        let c = chars[i];

        // 1. String or date literal.
        if c == '"' || c == '\'' {
            let (text, next) = scan_quoted(&chars, i);
            let class = if c == '\'' && is_date_literal(&text) {
                HighlightClass::Date
            } else {
                HighlightClass::Str
            };
            b.push(class, text);
            i = next;
            prev_word = None;
            continue;
        }

        // 2. Line comment.
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            let end = line_end(&chars, i);
            b.push(HighlightClass::Comment, collect(&chars[i..end]));
            i = end;
            prev_word = None;
            continue;
        }

        // 3. Preprocessor directive.
        if c == '#' {
            let end = word_end(&chars, i + 1);
            b.push(HighlightClass::Preproc, collect(&chars[i..end]));
            i = end;
            prev_word = None;
            continue;
        }

        // 4. Compilation attribute.
        if c == '&' {
            let end = word_end(&chars, i + 1);
            b.push(HighlightClass::Attr, collect(&chars[i..end]));
            i = end;
            prev_word = None;
            continue;
        }

        // 5. Number literal.
        if number_starts_at(&chars, i) {
            let end = number_end(&chars, i);
            b.push(HighlightClass::Number, collect(&chars[i..end]));
            i = end;
            prev_word = None;
            continue;
        }

        // 6. Identifier.
        if is_word_char(c) && !c.is_ascii_digit() {
            let end = word_end(&chars, i);
            let word = collect(&chars[i..end]);
            let class = classify_identifier(&chars, i, end, &word, prev_word.as_deref());
            match class {
                Some(cl) => b.push(cl, word.clone()),
                None => b.plain_str(&word),
            }
            prev_word = Some(word.to_lowercase());
            i = end;
            continue;
        }

        // 7. Operators, multi-character first.
        if let Some(op) = operator_at(&chars, i) {
            b.push(HighlightClass::Operator, op);
            i += op.chars().count();
            prev_word = None;
            continue;
        }

        // 8. Literal fallback.
        b.plain_char(c);
        if !c.is_whitespace() {
            prev_word = None;
        }
        i += 1;
    }

    b.finish()
}

fn classify_identifier(
    chars: &[char],
    start: usize,
    end: usize,
    word: &str,
    prev_word: Option<&str>,
) -> Option<HighlightClass> {
    // Member access is never a keyword, type or builtin.
    if start > 0 && chars[start - 1] == '.' {
        return None;
    }
    let lower = word.to_lowercase();
    if KEYWORD_SET.contains(lower.as_str()) {
        return Some(HighlightClass::Keyword);
    }
    if is_all_uppercase(word) && QUERY_KEYWORD_SET.contains(word) {
        return Some(HighlightClass::Keyword);
    }
    let after_new = matches!(prev_word, Some("новый") | Some("new"));
    if after_new || TYPE_SET.contains(lower.as_str()) {
        return Some(HighlightClass::Type);
    }
    let call_position = chars[end..]
        .iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| *c == '(');
    if call_position && BUILTIN_SET.contains(lower.as_str()) {
        return Some(HighlightClass::Builtin);
    }
    None
}

/// A number may start here only if the previous source character is not a
/// word character, `.` or `)`; otherwise the digits are an identifier tail
/// or a member-access fragment.
fn number_starts_at(chars: &[char], i: usize) -> bool {
    let leading_digit = chars[i].is_ascii_digit()
        || (chars[i] == '-' && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()));
    if !leading_digit {
        return false;
    }
    match i.checked_sub(1).map(|p| chars[p]) {
        None => true,
        Some(p) => !is_word_char(p) && p != '.' && p != ')',
    }
}

fn number_end(chars: &[char], start: usize) -> usize {
    let mut j = start;
    if chars[j] == '-' {
        j += 1;
    }
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if chars.get(j) == Some(&'.') && chars.get(j + 1).is_some_and(|c| c.is_ascii_digit()) {
        j += 1;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
    }
    if matches!(chars.get(j), Some('e') | Some('E')) {
        let mut k = j + 1;
        if matches!(chars.get(k), Some('+') | Some('-')) {
            k += 1;
        }
        if chars.get(k).is_some_and(|c| c.is_ascii_digit()) {
            j = k;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
        }
    }
    j
}

/// Consume a quoted literal. The delimiter is escaped by doubling, so `""`
/// inside a `"…"` literal does not terminate it. An unterminated literal
/// extends to end of input.
fn scan_quoted(chars: &[char], start: usize) -> (String, usize) {
    let delim = chars[start];
    let mut j = start + 1;
    while j < chars.len() {
        if chars[j] == delim {
            if chars.get(j + 1) == Some(&delim) {
                j += 2;
                continue;
            }
            j += 1;
            break;
        }
        j += 1;
    }
    (collect(&chars[start..j]), j)
}

/// A date literal is a `'…'` literal whose contents are exactly 8 digits
/// (date) or 14 digits (date + time).
fn is_date_literal(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 2 || chars[chars.len() - 1] != '\'' {
        return false;
    }
    let inner = &chars[1..chars.len() - 1];
    inner.iter().all(|c| c.is_ascii_digit()) && (inner.len() == 8 || inner.len() == 14)
}

fn operator_at(chars: &[char], i: usize) -> Option<&'static str> {
    let two = (chars[i], chars.get(i + 1).copied());
    match two {
        ('<', Some('=')) => return Some("<="),
        ('>', Some('=')) => return Some(">="),
        ('<', Some('>')) => return Some("<>"),
        _ => {}
    }
    match chars[i] {
        '+' => Some("+"),
        '-' => Some("-"),
        '*' => Some("*"),
        '/' => Some("/"),
        '%' => Some("%"),
        '=' => Some("="),
        '<' => Some("<"),
        '>' => Some(">"),
        _ => None,
    }
}

fn line_end(chars: &[char], from: usize) -> usize {
    let mut j = from;
    while j < chars.len() && chars[j] != '\n' {
        j += 1;
    }
    j
}

fn word_end(chars: &[char], from: usize) -> usize {
    let mut j = from;
    while j < chars.len() && is_word_char(chars[j]) {
        j += 1;
    }
    j
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classes_of(code: &str) -> Vec<(Option<HighlightClass>, String)> {
        tokenize(code)
            .into_iter()
            .map(|s| (s.class, s.text))
            .collect()
    }

    fn class_of(code: &str, word: &str) -> Option<HighlightClass> {
        tokenize(code)
            .into_iter()
            .find(|s| s.text == word)
            .map(|s| s.class)
            .unwrap_or_else(|| panic!("no span with text {word:?} in {code:?}"))
    }

    #[test]
    fn covers_entire_input() {
        let code = "Процедура Тест(Знач П1) Экспорт\n\t// комментарий\n\tА = \"строка \"\"с кавычкой\"\"\";\nКонецПроцедуры";
        let joined: String = tokenize(code).into_iter().map(|s| s.text).collect();
        assert_eq!(joined, code);
    }

    #[rstest]
    #[case("Процедура")]
    #[case("КонецПроцедуры")]
    #[case("Возврат")]
    #[case("EndProcedure")]
    #[case("Если")]
    fn keywords_case_insensitive(#[case] word: &str) {
        assert_eq!(class_of(word, word), Some(HighlightClass::Keyword));
        let upper = word.to_uppercase();
        assert_eq!(class_of(&upper, &upper), Some(HighlightClass::Keyword));
    }

    #[test]
    fn doubled_quote_does_not_terminate_string() {
        let spans = classes_of(r#"А = "а""б";"#);
        let s = spans
            .iter()
            .find(|(c, _)| *c == Some(HighlightClass::Str))
            .unwrap();
        assert_eq!(s.1, r#""а""б""#);
    }

    #[test]
    fn unterminated_string_extends_to_end_of_input() {
        let spans = classes_of("А = \"не закрыта");
        assert_eq!(
            spans.last().unwrap(),
            &(Some(HighlightClass::Str), "\"не закрыта".to_string())
        );
    }

    #[rstest]
    #[case("'20231231'", true)]
    #[case("'20231231120000'", true)]
    #[case("'2023'", false)]
    #[case("'строка'", false)]
    fn date_literal_classification(#[case] lit: &str, #[case] is_date: bool) {
        let expected = if is_date {
            HighlightClass::Date
        } else {
            HighlightClass::Str
        };
        assert_eq!(class_of(lit, lit), Some(expected));
    }

    #[test]
    fn line_comment_stops_at_newline() {
        let spans = classes_of("// привет\nА = 1;");
        assert_eq!(spans[0], (Some(HighlightClass::Comment), "// привет".into()));
        assert!(spans.iter().any(|(c, t)| c.is_none() && t.contains('\n')));
    }

    #[test]
    fn preprocessor_and_attribute() {
        assert_eq!(
            class_of("#Если Сервер Тогда", "#Если"),
            Some(HighlightClass::Preproc)
        );
        assert_eq!(
            class_of("&НаСервере\nПроцедура П()", "&НаСервере"),
            Some(HighlightClass::Attr)
        );
    }

    #[test]
    fn number_after_identifier_is_not_a_number() {
        // `Перем1` is one identifier; the digit is part of the word.
        let spans = classes_of("Перем1 = 2");
        assert_eq!(spans[0].1, "Перем1");
        assert_eq!(class_of("Перем1 = 2", "2"), Some(HighlightClass::Number));
    }

    #[test]
    fn number_with_fraction_and_exponent() {
        assert_eq!(class_of("А = 1.5e-3", "1.5e-3"), Some(HighlightClass::Number));
        assert_eq!(class_of("А = -42", "-42"), Some(HighlightClass::Number));
    }

    #[test]
    fn number_not_after_member_access_or_close_paren() {
        // `.5` after `)` or `.` must not become a number literal.
        let spans = classes_of("Ф(1).5");
        assert!(
            spans
                .iter()
                .filter(|(c, _)| *c == Some(HighlightClass::Number))
                .all(|(_, t)| t == "1")
        );
    }

    #[test]
    fn member_access_is_never_keyword_or_builtin() {
        assert_eq!(class_of("Запрос.Выполнить()", "Выполнить"), None);
        assert_eq!(class_of("Объект.Сообщить(1)", "Сообщить"), None);
    }

    #[test]
    fn query_keywords_require_all_uppercase() {
        assert_eq!(class_of("ВЫБРАТЬ Поле", "ВЫБРАТЬ"), Some(HighlightClass::Keyword));
        assert_eq!(class_of("Результат.Выбрать()", "Выбрать"), None);
        assert_eq!(class_of("Выбрать()", "Выбрать"), None);
    }

    #[test]
    fn type_after_new() {
        assert_eq!(class_of("А = Новый Массив;", "Массив"), Some(HighlightClass::Type));
        assert_eq!(class_of("Новый Массив", "Новый"), Some(HighlightClass::Keyword));
        // Unknown type name still classified after Новый.
        assert_eq!(
            class_of("А = Новый МояОбработка;", "МояОбработка"),
            Some(HighlightClass::Type)
        );
    }

    #[test]
    fn builtin_requires_call_position() {
        assert_eq!(
            class_of("Сообщить(\"привет\")", "Сообщить"),
            Some(HighlightClass::Builtin)
        );
        assert_eq!(class_of("А = Сообщить;", "Сообщить"), None);
    }

    #[test]
    fn multi_char_operators() {
        assert_eq!(class_of("А <= Б", "<="), Some(HighlightClass::Operator));
        assert_eq!(class_of("А <> Б", "<>"), Some(HighlightClass::Operator));
        assert_eq!(class_of("А >= Б", ">="), Some(HighlightClass::Operator));
    }

    #[test]
    fn unknown_characters_fall_through_as_plain() {
        let spans = classes_of("А = Б ? В : Г;");
        assert!(spans.iter().any(|(c, t)| c.is_none() && t.contains('?')));
        let joined: String = spans.into_iter().map(|(_, t)| t).collect();
        assert_eq!(joined, "А = Б ? В : Г;");
    }
}
