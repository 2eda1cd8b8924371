//! Stored API records and the findings reported against them.

use serde::{Deserialize, Serialize};

use apiscope_embeddings::CachedEmbedding;
use apiscope_openapi::ApiSpec;

/// A previously analyzed API.
///
/// Owned by the storage collaborator; the detector only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingApiRecord {
    /// Stable identifier.
    pub id: String,

    /// Display name, usually the spec title at analysis time.
    pub name: String,

    /// Who owns the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// The parsed spec.
    pub spec: ApiSpec,

    /// Embedding computed when the record was stored, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<CachedEmbedding>,
}

impl ExistingApiRecord {
    /// Create a record without a cached embedding.
    pub fn new(id: impl Into<String>, name: impl Into<String>, spec: ApiSpec) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: None,
            spec,
            embedding: None,
        }
    }

    /// Create a record named after its spec title.
    pub fn from_spec(id: impl Into<String>, spec: ApiSpec) -> Self {
        let name = spec.title().to_string();
        Self::new(id, name, spec)
    }

    /// Set the owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Attach a cached embedding.
    pub fn with_embedding(mut self, embedding: CachedEmbedding) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// One existing API that overlaps the API under analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFinding {
    /// Name of the existing API.
    pub name: String,

    /// Identifier of the existing API.
    pub api_id: String,

    /// Similarity rescaled to a 0-100 percentage.
    pub overlap: u32,

    /// Exact plus fuzzy overlapping endpoint paths.
    pub endpoints: usize,

    /// Suggested course of action.
    pub recommendation: String,

    /// Shared endpoints and data models, in words.
    pub details: Vec<String>,
}
