use serde_json::Value;

use crate::error::ParseError;

use super::node::SchemaNode;

static NULL: Value = Value::Null;

/// Which flavour of API description a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Swagger 2.0: `definitions`, body parameters, `responses.*.schema`.
    Swagger2,
    /// OpenAPI 3.x: `components.schemas`, `requestBody`, `responses.*.content`.
    OpenApi3,
    /// No version field; shapes from both dialects are accepted.
    Unversioned,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Swagger2 => "Swagger 2.0",
            Dialect::OpenApi3 => "OpenAPI 3.x",
            Dialect::Unversioned => "unversioned",
        }
    }
}

/// A validated input document.
///
/// Construction checks only what is needed to run at all: the root is an
/// object, the version (if any) is supported, and both a `paths` object and a
/// schema root exist.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    dialect: Dialect,
}

impl Document {
    pub fn from_value(root: Value) -> Result<Self, ParseError> {
        if !root.is_object() {
            return Err(ParseError::InvalidRoot {
                key: "$".to_string(),
                expected: "an object",
            });
        }

        let dialect = detect_dialect(&root)?;

        match root.get("paths") {
            None => return Err(ParseError::MissingField("paths".to_string())),
            Some(paths) if !paths.is_object() => {
                return Err(ParseError::InvalidRoot {
                    key: "paths".to_string(),
                    expected: "an object",
                });
            }
            Some(_) => {}
        }

        let (key, schemas) = schema_root(&root)
            .ok_or_else(|| ParseError::MissingField(missing_schema_key(dialect).to_string()))?;
        if !schemas.is_object() {
            return Err(ParseError::InvalidRoot {
                key: key.to_string(),
                expected: "an object",
            });
        }

        Ok(Self { root, dialect })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn root(&self) -> SchemaNode<'_> {
        SchemaNode::new(&self.root)
    }

    pub fn title(&self) -> Option<&str> {
        self.root().get("info").and_then(|info| info.str("title"))
    }

    pub fn version(&self) -> Option<&str> {
        self.root().get("info").and_then(|info| info.str("version"))
    }

    /// The `paths` object.
    pub fn paths(&self) -> SchemaNode<'_> {
        SchemaNode::new(&self.root["paths"])
    }

    /// The schema root: `definitions`, or `components.schemas`.
    pub fn schemas(&self) -> SchemaNode<'_> {
        match schema_root(&self.root) {
            Some((_, schemas)) => SchemaNode::new(schemas),
            None => SchemaNode::new(&NULL),
        }
    }
}

fn detect_dialect(root: &Value) -> Result<Dialect, ParseError> {
    if let Some(version) = root.get("swagger") {
        let version = version_text(version);
        if version.starts_with("2.") {
            return Ok(Dialect::Swagger2);
        }
        return Err(ParseError::UnsupportedVersion(format!("swagger {version}")));
    }
    if let Some(version) = root.get("openapi") {
        let version = version_text(version);
        if version.starts_with("3.") {
            return Ok(Dialect::OpenApi3);
        }
        return Err(ParseError::UnsupportedVersion(format!("openapi {version}")));
    }
    Ok(Dialect::Unversioned)
}

/// YAML documents often carry `swagger: 2.0` as a number.
fn version_text(version: &Value) -> String {
    match version {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn schema_root(root: &Value) -> Option<(&'static str, &Value)> {
    if let Some(definitions) = root.get("definitions") {
        return Some(("definitions", definitions));
    }
    root.get("components")
        .and_then(|c| c.get("schemas"))
        .map(|schemas| ("components.schemas", schemas))
}

fn missing_schema_key(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::OpenApi3 => "components.schemas",
        Dialect::Swagger2 | Dialect::Unversioned => "definitions",
    }
}
