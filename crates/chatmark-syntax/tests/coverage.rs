//! Total-coverage property: for any input, the concatenation of a
//! tokenizer's span texts equals the input exactly, with no characters dropped
//! or duplicated, even for malformed or truncated source.

use chatmark_syntax::{Language, tokenize};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn reassemble(code: &str, language: Language) -> String {
    tokenize(code, language).into_iter().map(|s| s.text).collect()
}

#[rstest]
#[case("")]
#[case("Процедура Тест()\n\tВозврат;\nКонецПроцедуры")]
#[case("А = \"строка с \"\"кавычками\"\" внутри\";")]
#[case("Дата = '20231231'; Время = '20231231235959';")]
#[case("#Если Сервер Тогда\n&НаСервере\n#КонецЕсли")]
#[case("А = -1.5e10 + 2 <= 3 <> 4;")]
#[case("незакрытая \"строка")]
#[case("ВЫБРАТЬ Поле ИЗ Таблица ГДЕ Поле = 1")]
#[case("🙂 эмодзи и прочий ~ мусор @ здесь")]
fn bsl_spans_cover_input(#[case] code: &str) {
    assert_eq!(reassemble(code, Language::Bsl), code);
}

#[rstest]
#[case("")]
#[case("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a b=\"1\">t</a>")]
#[case("<!DOCTYPE doc [<!ELEMENT doc (#PCDATA)>]>")]
#[case("<!-- comment without end")]
#[case("<![CDATA[raw <stuff> here]]> tail")]
#[case("<a xmlns:x=\"u\"><x:b/></a>")]
#[case("&amp; &bad &#x2F; <not-closed attr=\"v")]
#[case("plain text, no markup at all")]
fn xml_spans_cover_input(#[case] code: &str) {
    assert_eq!(reassemble(code, Language::Xml), code);
}
