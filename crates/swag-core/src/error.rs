use thiserror::Error;

/// A document-level failure: nothing can be generated from the input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported document version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("`{key}` must be {expected}")]
    InvalidRoot { key: String, expected: &'static str },
}

/// A schema node whose shape makes it impossible to describe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("`{key}` must be {expected}")]
    InvalidShape { key: String, expected: &'static str },

    #[error("property `{0}` is not a schema object")]
    InvalidProperty(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
}
