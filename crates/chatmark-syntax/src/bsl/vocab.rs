//! Fixed BSL vocabulary: reserved keywords, query-language keywords, type
//! names and builtin functions, in both Russian and English spellings.
//!
//! All sets except [`QUERY_KEYWORDS`] are matched case-insensitively and are
//! therefore stored lowercased. Query keywords are matched only against
//! all-uppercase source spellings (see the tokenizer), so they are stored
//! uppercased.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Reserved language keywords (control flow, declarations, literals).
pub(crate) const KEYWORDS: &[&str] = &[
    // Russian
    "процедура",
    "конецпроцедуры",
    "функция",
    "конецфункции",
    "перем",
    "знач",
    "экспорт",
    "если",
    "тогда",
    "иначеесли",
    "иначе",
    "конецесли",
    "для",
    "каждого",
    "из",
    "по",
    "цикл",
    "конеццикла",
    "пока",
    "прервать",
    "продолжить",
    "возврат",
    "и",
    "или",
    "не",
    "попытка",
    "исключение",
    "конецпопытки",
    "вызватьисключение",
    "новый",
    "истина",
    "ложь",
    "неопределено",
    "перейти",
    "выполнить",
    "добавитьобработчик",
    "удалитьобработчик",
    // English
    "procedure",
    "endprocedure",
    "function",
    "endfunction",
    "var",
    "val",
    "export",
    "if",
    "then",
    "elsif",
    "else",
    "endif",
    "for",
    "each",
    "in",
    "to",
    "do",
    "enddo",
    "while",
    "break",
    "continue",
    "return",
    "and",
    "or",
    "not",
    "try",
    "except",
    "endtry",
    "raise",
    "new",
    "true",
    "false",
    "undefined",
    "null",
    "goto",
    "execute",
    "addhandler",
    "removehandler",
];

/// Query-language reserved words that collide with ordinary method names
/// (`Запрос.Выбрать()` vs `ВЫБРАТЬ ... ИЗ`). Classified as keywords only
/// when the source spelling is literally all-uppercase.
pub(crate) const QUERY_KEYWORDS: &[&str] = &[
    "ВЫБРАТЬ",
    "ИЗ",
    "ГДЕ",
    "КАК",
    "СОЕДИНЕНИЕ",
    "ЛЕВОЕ",
    "ПРАВОЕ",
    "ВНУТРЕННЕЕ",
    "ПОЛНОЕ",
    "ОБЪЕДИНИТЬ",
    "СГРУППИРОВАТЬ",
    "УПОРЯДОЧИТЬ",
    "ПЕРВЫЕ",
    "РАЗЛИЧНЫЕ",
    "ПОМЕСТИТЬ",
    "ИТОГИ",
    "ИМЕЮЩИЕ",
    "ВЫБОР",
    "КОГДА",
    "КОНЕЦ",
    "SELECT",
    "FROM",
    "WHERE",
    "AS",
    "JOIN",
    "LEFT",
    "RIGHT",
    "INNER",
    "FULL",
    "UNION",
    "GROUP",
    "ORDER",
    "TOP",
    "DISTINCT",
    "INTO",
    "TOTALS",
    "HAVING",
    "CASE",
    "WHEN",
    "END",
];

/// Platform collection and object type names, usually seen after `Новый`.
pub(crate) const TYPES: &[&str] = &[
    "массив",
    "структура",
    "соответствие",
    "списокзначений",
    "таблицазначений",
    "фиксированныймассив",
    "фиксированнаяструктура",
    "запрос",
    "построительзапроса",
    "двоичныеданные",
    "уникальныйидентификатор",
    "описаниетипов",
    "хранилищезначения",
    "чтениеxml",
    "записьxml",
    "чтениеjson",
    "записьjson",
    "текстовыйдокумент",
    "табличныйдокумент",
    "array",
    "structure",
    "map",
    "valuelist",
    "valuetable",
    "fixedarray",
    "fixedstructure",
    "query",
    "querybuilder",
    "binarydata",
    "uuid",
    "typedescription",
    "valuestorage",
    "xmlreader",
    "xmlwriter",
    "jsonreader",
    "jsonwriter",
    "textdocument",
    "spreadsheetdocument",
];

/// Global builtin functions. Only classified as builtins in call position
/// (next non-whitespace character is `(`).
pub(crate) const BUILTINS: &[&str] = &[
    "сообщить",
    "предупреждение",
    "вопрос",
    "стрдлина",
    "сокрлп",
    "сокрл",
    "сокрп",
    "врег",
    "нрег",
    "трег",
    "лев",
    "прав",
    "сред",
    "стрнайти",
    "стрзаменить",
    "стрразделить",
    "стрсоединить",
    "стршаблон",
    "пустаястрока",
    "символ",
    "кодсимвола",
    "число",
    "строка",
    "дата",
    "булево",
    "цел",
    "окр",
    "макс",
    "мин",
    "типзнч",
    "тип",
    "значениезаполнено",
    "текущаядата",
    "началогода",
    "конецгода",
    "началомесяца",
    "конецмесяца",
    "деньнедели",
    "message",
    "strlen",
    "trimall",
    "triml",
    "trimr",
    "upper",
    "lower",
    "title",
    "left",
    "right",
    "mid",
    "strfind",
    "strreplace",
    "strsplit",
    "strconcat",
    "strtemplate",
    "isblankstring",
    "char",
    "charcode",
    "number",
    "string",
    "date",
    "boolean",
    "int",
    "round",
    "max",
    "min",
    "typeof",
    "type",
    "valueisfilled",
    "currentdate",
    "begofyear",
    "endofyear",
    "begofmonth",
    "endofmonth",
    "weekday",
];

pub(crate) static KEYWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

pub(crate) static QUERY_KEYWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| QUERY_KEYWORDS.iter().copied().collect());

pub(crate) static TYPE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TYPES.iter().copied().collect());

pub(crate) static BUILTIN_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BUILTINS.iter().copied().collect());
