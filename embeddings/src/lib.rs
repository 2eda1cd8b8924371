//! # Embeddings
//!
//! Embedding generation and vector similarity for API duplicate detection.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert API summaries to dense vectors through a provider
//! - **Cosine Similarity**: Score how closely two API surfaces point the same way
//! - **Cached Vectors**: Vectors stored next to an API record, tagged with the model that made them
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► cosine_similarity         │
//! │       │                    │                                    │
//! │       ▼                    ▼                                    │
//! │  OpenAIProvider      CachedEmbedding                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod error;
pub mod provider;
pub mod similarity;

pub use cache::CachedEmbedding;
pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use similarity::{cosine_similarity, zero_vector};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 1536; // OpenAI text-embedding-3-small

/// Embedding model used when none is configured.
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";
