/// Affixes removed before looking for the entity word.
const AFFIXES: &[&str] = &[
    "Dto", "DTO", "Request", "Response", "Proxy", "Create", "Update", "Delete", "Filter", "Paged",
];

const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "of", "in", "to", "for", "by", "with", "on", "at", "from", "as", "is",
    "are", "was", "were", "be", "has", "have", "had", "do", "does", "did", "get", "set", "add",
    "remove", "update", "delete", "create", "new", "old", "current", "previous", "next", "first",
    "last", "multiple", "single", "all", "any", "each", "every", "some", "no", "not", "type",
    "status", "category", "filter", "search", "find", "list", "page", "paged", "count", "total",
    "sum", "average", "min", "max", "value", "values", "data", "info", "detail", "details",
    "item", "items", "element", "elements", "object", "objects", "entity", "entities", "model",
    "models", "class", "record", "struct", "enum", "interface", "base", "abstract", "virtual",
    "override", "static", "public", "private", "protected", "internal", "sealed", "partial",
    "async", "await", "task",
];

/// Infer the entity family of a model name.
///
/// `CreateOrderRequest` and `OrderDto` both land in `Order`. Models whose name
/// has no words at all land in `Common`.
pub fn categorize(model_name: &str) -> String {
    let cleaned = AFFIXES
        .iter()
        .fold(model_name.to_string(), |name, affix| name.replace(*affix, ""));
    let words = split_camel_case(&cleaned);
    words
        .iter()
        .find(|w| w.chars().count() > 2 && !is_stop_word(w))
        .or_else(|| words.first())
        .cloned()
        .unwrap_or_else(|| "Common".to_string())
}

/// Start a new word at every upper-case letter.
pub fn split_camel_case(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in input.chars() {
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}
