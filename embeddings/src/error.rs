//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while generating or comparing embeddings.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// No credentials were supplied.
    #[error("embedding provider not configured")]
    ProviderNotConfigured,

    /// The service answered with a non-success status.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The response body had no usable vector.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP 429.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The provider did not answer in time.
    #[error("embedding request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Two vectors of different length were compared.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Transport failure before a status was received.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
