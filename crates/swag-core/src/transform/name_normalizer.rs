use std::collections::HashSet;
use std::sync::LazyLock;

use heck::ToUpperCamelCase;
use regex::Regex;

/// Make a schema name usable as a type name.
///
/// Keeps letters, digits and underscores. An empty result becomes
/// `UnknownModel`; a result not starting with a letter is prefixed with
/// `Model`.
pub fn sanitize_type_name(raw: &str) -> String {
    let cleaned = identifier_chars(raw);
    if cleaned.is_empty() {
        return "UnknownModel".to_string();
    }
    if !starts_with_letter(&cleaned) {
        return format!("Model{cleaned}");
    }
    cleaned
}

/// Filter to identifier characters and upper-case the first one.
pub fn to_pascal_case(raw: &str) -> String {
    let cleaned = identifier_chars(raw);
    if cleaned.is_empty() {
        return "UnknownProperty".to_string();
    }
    map_first(&cleaned, char::to_uppercase)
}

/// Filter to identifier characters and lower-case the first one.
pub fn to_camel_case(raw: &str) -> String {
    let cleaned = identifier_chars(raw);
    if cleaned.is_empty() {
        return "param".to_string();
    }
    map_first(&cleaned, char::to_lowercase)
}

/// Pick the identifier for a property of `owner`.
///
/// The Pascal-cased name gets a `Value` suffix when it would shadow the owning
/// type, then a numeric suffix (1, 2, ...) while it collides with `used`. The
/// caller records the result in `used`.
pub fn resolve_property_identifier(raw: &str, owner: &str, used: &HashSet<String>) -> String {
    let mut name = to_pascal_case(raw);
    if name == owner || name == sanitize_type_name(owner) {
        name.push_str("Value");
    }
    unique_identifier(&name, used)
}

/// `base` if unused, else the first of `base1`, `base2`, ... that is free.
pub fn unique_identifier(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
];

/// English plural of a single word, used for folder and namespace segments.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == lower) {
        return match_case(word, plural);
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }
    if let Some(stem) = lower.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
        return format!("{word}s");
    }
    if lower.ends_with("fe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    if lower.ends_with('f') {
        return format!("{}ves", &word[..word.len() - 1]);
    }
    if let Some(stem) = lower.strip_suffix('o') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{word}es");
        }
    }
    format!("{word}s")
}

static RESOURCE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)resource").expect("valid regex"));
static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)v\d+").expect("valid regex"));
static RESOURCE_OR_VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)resource|v\d+").expect("valid regex"));

/// Strip `resource` and/or `v<digits>` tokens from a service name.
///
/// One pass over the original text: a removal never creates a new token out
/// of its neighbours. The first character is never touched, so a name is
/// never emptied.
pub fn clean_interface_name(name: &str, strip_resource: bool, strip_version: bool) -> String {
    let token: &Regex = match (strip_resource, strip_version) {
        (true, true) => &*RESOURCE_OR_VERSION_TOKEN,
        (true, false) => &*RESOURCE_TOKEN,
        (false, true) => &*VERSION_TOKEN,
        (false, false) => return name.to_string(),
    };
    let Some(first) = name.chars().next() else {
        return String::new();
    };
    let rest = &name[first.len_utf8()..];
    format!("{first}{}", token.replace_all(rest, ""))
}

/// Letters and digits only, first letter upper-cased, `General` if empty.
pub fn to_valid_class_name(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
    if cleaned.is_empty() {
        return "General".to_string();
    }
    map_first(&cleaned, char::to_uppercase)
}

/// Method stem for an operationId: cut at the first `Using` (any case), then
/// Pascal-case. `getOrderUsingGET` becomes `GetOrder`.
pub fn clean_operation_id(operation_id: &str) -> String {
    let cut = operation_id
        .to_ascii_lowercase()
        .find("using")
        .map(|at| &operation_id[..at])
        .filter(|stem| !stem.is_empty())
        .unwrap_or(operation_id);
    to_pascal_case(cut)
}

/// Identifier for an enum member from its raw label.
///
/// Labels that produce no identifier characters become `Value`; labels that
/// start with a digit are prefixed with `Value`.
pub fn enum_member_identifier(label: &str) -> String {
    let name = label.to_upper_camel_case();
    let name: String = name.chars().filter(|c| c.is_alphanumeric() || *c == '_').collect();
    if name.is_empty() {
        return "Value".to_string();
    }
    if !starts_with_letter(&name) {
        return format!("Value{name}");
    }
    name
}

fn identifier_chars(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_alphabetic)
}

fn map_first<I>(s: &str, f: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Apply the casing of `original` (all upper, capitalized, lower) to `word`.
fn match_case(original: &str, word: &str) -> String {
    if original.len() > 1 && original.chars().all(|c| !c.is_lowercase()) {
        return word.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        return map_first(word, char::to_uppercase);
    }
    word.to_string()
}
