use serde_json::Value;

/// Read-only view over one fragment of the input document.
///
/// Every accessor is total: asking a non-object for a child, or a non-string
/// for its text, yields `None` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaNode<'a> {
    value: &'a Value,
}

/// The shape of a node, for callers that need to match on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeView<'a> {
    Object(SchemaNode<'a>),
    Array(&'a [Value]),
    String(&'a str),
    Bool(bool),
    Number(&'a serde_json::Number),
    Null,
}

impl<'a> SchemaNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn view(&self) -> NodeView<'a> {
        match self.value {
            Value::Object(_) => NodeView::Object(*self),
            Value::Array(items) => NodeView::Array(items),
            Value::String(s) => NodeView::String(s),
            Value::Bool(b) => NodeView::Bool(*b),
            Value::Number(n) => NodeView::Number(n),
            Value::Null => NodeView::Null,
        }
    }

    pub fn is_object(&self) -> bool {
        self.value.is_object()
    }

    /// Child node under `key`, if this node is an object that has it.
    pub fn get(&self, key: &str) -> Option<SchemaNode<'a>> {
        self.value.get(key).map(SchemaNode::new)
    }

    pub fn has(&self, key: &str) -> bool {
        self.value.as_object().is_some_and(|o| o.contains_key(key))
    }

    /// String value of the child under `key`.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// True only for a literal boolean `true`; `"true"` or `1` do not count.
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.value.get(key), Some(Value::Bool(true)))
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }

    /// The `type` keyword. In the array form (`["string", "null"]`) the first
    /// non-null entry is used.
    pub fn type_name(&self) -> Option<&'a str> {
        match self.value.get("type")? {
            Value::String(s) => Some(s),
            Value::Array(types) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null"),
            _ => None,
        }
    }

    pub fn format(&self) -> Option<&'a str> {
        self.str("format")
    }

    /// Non-blank `description`, trimmed.
    pub fn description(&self) -> Option<&'a str> {
        self.str("description")
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Key/child pairs in document order, if this node is an object.
    pub fn entries(self) -> Option<impl Iterator<Item = (&'a str, SchemaNode<'a>)>> {
        self.value
            .as_object()
            .map(|o| o.iter().map(|(k, v)| (k.as_str(), SchemaNode::new(v))))
    }

    /// Elements in order, if this node is an array.
    pub fn elements(self) -> Option<impl Iterator<Item = SchemaNode<'a>>> {
        self.value
            .as_array()
            .map(|items| items.iter().map(SchemaNode::new))
    }

    /// Text form of a scalar: strings as-is, anything else as raw JSON.
    pub fn to_text(&self) -> String {
        match self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
