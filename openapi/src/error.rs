//! Error types for spec parsing.

use thiserror::Error;

/// Result type alias for spec operations.
pub type Result<T> = std::result::Result<T, SpecError>;

/// Errors that can occur while reading an API description.
#[derive(Error, Debug)]
pub enum SpecError {
    /// The text is neither YAML nor JSON.
    #[error("invalid OpenAPI spec format: {0}")]
    Parse(String),

    /// A required top-level field is absent.
    #[error("invalid OpenAPI spec: missing `{0}`")]
    MissingField(&'static str),

    /// The document parsed but does not have the expected shape.
    #[error("invalid OpenAPI spec: {0}")]
    Invalid(#[from] serde_json::Error),
}
