use indexmap::IndexMap;

use crate::report::Diagnostic;

use super::models::{ModelDescriptor, ModelNames, ModelNamespaceIndex};
use super::operations::EndpointInfo;

/// Everything a generator needs from one input document.
#[derive(Debug, Clone, Default)]
pub struct SwagSpec {
    pub info: SpecInfo,
    pub models: Vec<ModelDescriptor>,
    pub namespace_index: ModelNamespaceIndex,
    /// Used to translate `$ref` targets into emitted model names.
    pub model_names: ModelNames,
    pub services: ServiceGroups,
    /// Diagnostics raised while building the spec (skipped endpoints, ...).
    pub diagnostics: Vec<Diagnostic>,
}

/// API metadata.
#[derive(Debug, Clone, Default)]
pub struct SpecInfo {
    pub title: Option<String>,
    pub version: Option<String>,
}

/// Endpoints bucketed by primary tag, in discovery order.
pub type ServiceGroups = IndexMap<String, Vec<EndpointInfo>>;

/// A resolved value type, independent of the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    String,
    DateTime,
    Bytes,
    Int32,
    Int64,
    Decimal,
    Float,
    Double,
    Boolean,
    List(Box<TypeRef>),
    Map(Box<TypeRef>), // string keys
    Ref(String),       // sanitized model name
    Any,
    Void,
}

impl TypeRef {
    pub fn is_container(&self) -> bool {
        matches!(self, TypeRef::List(_) | TypeRef::Map(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    /// Names of all models this type mentions, outermost first.
    pub fn referenced_models(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_refs(&mut names);
        names
    }

    fn collect_refs<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeRef::Ref(name) => names.push(name),
            TypeRef::List(inner) | TypeRef::Map(inner) => inner.collect_refs(names),
            _ => {}
        }
    }

    /// Whether a date-time appears anywhere in this type.
    pub fn mentions_date_time(&self) -> bool {
        match self {
            TypeRef::DateTime => true,
            TypeRef::List(inner) | TypeRef::Map(inner) => inner.mentions_date_time(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_models_nested() {
        let ty = TypeRef::Map(Box::new(TypeRef::List(Box::new(TypeRef::Ref(
            "Item".to_string(),
        )))));
        assert_eq!(ty.referenced_models(), vec!["Item"]);
        assert!(ty.is_container());
        assert!(!TypeRef::Ref("Item".to_string()).is_container());
    }

    #[test]
    fn test_mentions_date_time() {
        assert!(TypeRef::List(Box::new(TypeRef::DateTime)).mentions_date_time());
        assert!(!TypeRef::String.mentions_date_time());
    }
}
