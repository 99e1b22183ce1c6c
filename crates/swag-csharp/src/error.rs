use swag_core::error::SchemaError;
use thiserror::Error;

/// Why a single file could not be emitted.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("{0} is not supported by the HTTP client")]
    UnsupportedMethod(String),
}
