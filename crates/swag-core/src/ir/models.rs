use indexmap::IndexMap;
use serde_json::Value;

use crate::parse::SchemaNode;

use super::types::TypeRef;

/// How a top-level definition is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Enum,
    Object,
    SimpleWrapper,
    Fallback,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Enum => "enum",
            ModelKind::Object => "object",
            ModelKind::SimpleWrapper => "simple",
            ModelKind::Fallback => "fallback",
        }
    }
}

/// One top-level schema definition, classified and categorized.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// Sanitized, unique type name.
    pub name: String,
    /// Key under the schema root.
    pub original_name: String,
    pub kind: ModelKind,
    /// Entity family, e.g. `Order` for `CreateOrderRequest`.
    pub category: String,
    /// Pluralized folder segment derived from `category`.
    pub folder: String,
    /// Only set for simple wrappers.
    pub resolved_type: Option<TypeRef>,
    pub source: Value,
}

impl ModelDescriptor {
    pub fn node(&self) -> SchemaNode<'_> {
        SchemaNode::new(&self.source)
    }

    pub fn namespace_hint(&self) -> NamespaceHint {
        NamespaceHint {
            folder: self.folder.clone(),
            is_enum: self.kind == ModelKind::Enum,
        }
    }
}

/// Where a model lives relative to the models namespace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceHint {
    pub folder: String,
    pub is_enum: bool,
}

impl NamespaceHint {
    /// Namespace suffix, e.g. `Orders` or `Orders.Enums`.
    pub fn relative(&self) -> String {
        if self.is_enum {
            format!("{}.Enums", self.folder)
        } else {
            self.folder.clone()
        }
    }

    /// Directory below the models root, e.g. `Orders/Enums`.
    pub fn directory(&self) -> String {
        if self.is_enum {
            format!("{}/Enums", self.folder)
        } else {
            self.folder.clone()
        }
    }
}

/// Model name to namespace lookup.
///
/// Filled once from the full inventory and never changed afterwards, so every
/// emitter sees the same answers.
#[derive(Debug, Clone, Default)]
pub struct ModelNamespaceIndex {
    entries: IndexMap<String, NamespaceHint>,
}

impl ModelNamespaceIndex {
    pub fn from_models(models: &[ModelDescriptor]) -> Self {
        let entries = models
            .iter()
            .map(|m| (m.name.clone(), m.namespace_hint()))
            .collect();
        Self { entries }
    }

    /// Exact match first, then a case-insensitive one.
    pub fn lookup(&self, name: &str) -> Option<&NamespaceHint> {
        self.entries.get(name).or_else(|| {
            self.entries
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Definition key to emitted model name.
///
/// Differs from sanitizing the key only where two keys sanitize alike and the
/// later one got a numeric suffix.
#[derive(Debug, Clone, Default)]
pub struct ModelNames {
    by_key: IndexMap<String, String>,
}

impl ModelNames {
    pub fn from_models(models: &[ModelDescriptor]) -> Self {
        let by_key = models
            .iter()
            .map(|m| (m.original_name.clone(), m.name.clone()))
            .collect();
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }
}

/// A property of an object model, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Unique identifier within the owning model.
    pub name: String,
    /// Property key as written in the document.
    pub json_name: String,
    pub field_type: TypeRef,
    pub required: bool,
    pub description: Option<String>,
}

/// One enumeration member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    /// Raw text of the `enum` entry.
    pub label: String,
    pub value: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, folder: &str, kind: ModelKind) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            original_name: name.to_string(),
            kind,
            category: folder.trim_end_matches('s').to_string(),
            folder: folder.to_string(),
            resolved_type: None,
            source: Value::Null,
        }
    }

    #[test]
    fn test_namespace_hint_relative() {
        let order = model("Order", "Orders", ModelKind::Object);
        let status = model("OrderStatus", "Orders", ModelKind::Enum);
        assert_eq!(order.namespace_hint().relative(), "Orders");
        assert_eq!(status.namespace_hint().relative(), "Orders.Enums");
        assert_eq!(status.namespace_hint().directory(), "Orders/Enums");
    }

    #[test]
    fn test_index_lookup_falls_back_to_case_insensitive() {
        let index = ModelNamespaceIndex::from_models(&[
            model("Order", "Orders", ModelKind::Object),
            model("User", "Users", ModelKind::Object),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("Order").unwrap().folder, "Orders");
        assert_eq!(index.lookup("order").unwrap().folder, "Orders");
        assert!(index.lookup("Missing").is_none());
    }

    #[test]
    fn test_model_names_keyed_by_definition() {
        let mut renamed = model("PageOrder1", "Pages", ModelKind::Object);
        renamed.original_name = "PageOrder".to_string();
        let mut first = model("PageOrder", "Pages", ModelKind::Object);
        first.original_name = "Page«Order»".to_string();

        let names = ModelNames::from_models(&[first, renamed]);
        assert_eq!(names.get("Page«Order»"), Some("PageOrder"));
        assert_eq!(names.get("PageOrder"), Some("PageOrder1"));
        assert_eq!(names.get("Missing"), None);
    }
}
