pub mod document;
pub mod node;

use crate::error::ParseError;
pub use document::{Dialect, Document};
pub use node::{NodeView, SchemaNode};

/// Parse a Swagger/OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let root: serde_json::Value = serde_json::from_str(input)?;
    Document::from_value(root)
}

/// Parse a Swagger/OpenAPI document from YAML.
///
/// Goes through a YAML value first so non-string keys such as unquoted
/// response codes (`200:`) become strings.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    let root = serde_json::to_value(yaml)?;
    Document::from_value(root)
}
