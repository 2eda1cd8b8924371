//! Configuration for the duplicate detector.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use apiscope_embeddings::DEFAULT_MODEL;

use crate::error::{DuplicateError, Result};

/// Configuration for the duplicate detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum cosine similarity for a record to be reported.
    pub threshold: f32,

    /// Embedding model to request; also the tag cached vectors must carry.
    pub embedding_model: String,

    /// Per-request timeout for embedding calls, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum number of embedding requests in flight during a scan.
    pub max_concurrent_requests: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.70,
            embedding_model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 30,
            max_concurrent_requests: 8,
        }
    }
}

impl DetectorConfig {
    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set the number of concurrent embedding requests.
    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    /// The per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(DuplicateError::InvalidConfig(format!(
                "threshold must be within [-1, 1], got {}",
                self.threshold
            )));
        }
        if self.embedding_model.trim().is_empty() {
            return Err(DuplicateError::InvalidConfig(
                "embedding_model must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(DuplicateError::InvalidConfig(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(DuplicateError::InvalidConfig(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
