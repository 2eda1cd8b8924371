//! Embeddings cached alongside stored API records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Embedding;

/// A previously computed embedding, tagged with the model that produced it.
///
/// Vectors from different models live in different spaces, so a cached
/// vector is only reused when its model matches the one currently in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedEmbedding {
    /// Model used to generate the embedding.
    pub model: String,

    /// The embedding vector.
    pub vector: Embedding,
}

impl CachedEmbedding {
    /// Create a new cached embedding.
    pub fn new(model: impl Into<String>, vector: Embedding) -> Self {
        Self {
            model: model.into(),
            vector,
        }
    }

    /// Dimension of the cached vector.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Return the vector if it was produced by `model`.
    pub fn vector_for(&self, model: &str) -> Option<&Embedding> {
        if self.model == model {
            Some(&self.vector)
        } else {
            debug!(
                "Ignoring cached embedding from model {} (current model: {model})",
                self.model
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vector_for_matching_model() {
        let cached = CachedEmbedding::new("text-embedding-3-small", vec![1.0, 2.0]);
        assert_eq!(
            cached.vector_for("text-embedding-3-small"),
            Some(&vec![1.0, 2.0])
        );
        assert_eq!(cached.dimension(), 2);
    }

    #[test]
    fn test_vector_for_other_model_is_a_miss() {
        let cached = CachedEmbedding::new("text-embedding-ada-002", vec![1.0, 2.0]);
        assert_eq!(cached.vector_for("text-embedding-3-small"), None);
    }

    #[test]
    fn test_serde_shape() {
        let cached = CachedEmbedding::new("m", vec![0.5]);
        let json = serde_json::to_value(&cached).unwrap();
        assert_eq!(json, serde_json::json!({"model": "m", "vector": [0.5]}));
    }
}
