//! Error types for duplicate detection.

use thiserror::Error;

/// Result type alias for duplicate detection.
pub type Result<T> = std::result::Result<T, DuplicateError>;

/// Errors surfaced to callers of the detector.
///
/// Per-record embedding failures are not among them: those degrade to a
/// zero vector inside the scan.
#[derive(Error, Debug)]
pub enum DuplicateError {
    /// Embedding error that could not be absorbed, such as a dimension
    /// mismatch or a failure to embed the spec under analysis.
    #[error("embedding error: {0}")]
    Embedding(#[from] apiscope_embeddings::EmbeddingError),

    /// Configuration error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// API record not found in the store.
    #[error("API not found: {0}")]
    NotFound(String),
}
