//! The duplicate detector.
//!
//! Summarizes the API under analysis, embeds it, compares it against every
//! stored record and reports the records above the similarity threshold,
//! most similar first.

use std::cmp::Reverse;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use apiscope_embeddings::{
    CachedEmbedding, Embedding, EmbeddingError, EmbeddingProvider, EmbeddingRequest,
    cosine_similarity, zero_vector,
};
use apiscope_openapi::{ApiSpec, summarize};

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::overlap::{count_overlap, overlap_details};
use crate::recommendation::Recommendation;
use crate::record::{DuplicateFinding, ExistingApiRecord};
use crate::store::ApiStore;

/// Rescale a cosine similarity to a 0-100 percentage.
pub fn overlap_percentage(similarity: f32) -> u32 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Finds stored APIs that duplicate the one under analysis.
pub struct DuplicateDetector {
    provider: Arc<dyn EmbeddingProvider>,
    config: DetectorConfig,
}

impl DuplicateDetector {
    /// Create a detector. Fails if the configuration is invalid.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Find records that overlap `current`.
    ///
    /// Records whose name equals the current spec's title are treated as the
    /// same API and skipped. Embedding failures for individual records are
    /// logged and scored as zero similarity. A dimension mismatch between
    /// vectors, or a failure to embed `current` itself, is returned as an
    /// error.
    pub async fn find_duplicates(
        &self,
        current: &ApiSpec,
        records: &[ExistingApiRecord],
    ) -> Result<Vec<DuplicateFinding>> {
        self.scan(current, None, records).await
    }

    /// Like [`find_duplicates`](Self::find_duplicates), additionally
    /// skipping the record stored under `current_id`.
    pub async fn find_duplicates_for(
        &self,
        current_id: &str,
        current: &ApiSpec,
        records: &[ExistingApiRecord],
    ) -> Result<Vec<DuplicateFinding>> {
        self.scan(current, Some(current_id), records).await
    }

    /// Scan every record in `store`.
    pub async fn find_duplicates_in_store(
        &self,
        store: &dyn ApiStore,
        current: &ApiSpec,
    ) -> Result<Vec<DuplicateFinding>> {
        let records = store.list().await?;
        self.find_duplicates(current, &records).await
    }

    /// Embed a spec for caching alongside its stored record.
    pub async fn embed_spec(&self, spec: &ApiSpec) -> Result<CachedEmbedding> {
        let vector = self.embed_text(&summarize(spec)).await?;
        Ok(CachedEmbedding::new(
            self.config.embedding_model.clone(),
            vector,
        ))
    }

    async fn scan(
        &self,
        current: &ApiSpec,
        current_id: Option<&str>,
        records: &[ExistingApiRecord],
    ) -> Result<Vec<DuplicateFinding>> {
        let title = current.title();
        let candidates: Vec<&ExistingApiRecord> = records
            .iter()
            .filter(|record| {
                let same_api = record.name == title || current_id == Some(record.id.as_str());
                if same_api {
                    debug!("Skipping {} ({}): same API", record.name, record.id);
                }
                !same_api
            })
            .collect();

        if candidates.is_empty() {
            debug!("No existing APIs to compare against {title}");
            return Ok(Vec::new());
        }

        let current_embedding = self.embed_text(&summarize(current)).await?;
        let dimension = current_embedding.len();

        // `buffered` yields in input order regardless of completion order.
        let embeddings: Vec<Embedding> = stream::iter(candidates.iter().copied())
            .map(|record| self.record_embedding(record, dimension))
            .buffered(self.config.max_concurrent_requests)
            .collect()
            .await;

        let current_paths = current.path_set();
        let mut findings = Vec::new();
        for (record, embedding) in candidates.iter().zip(&embeddings) {
            let similarity = cosine_similarity(&current_embedding, embedding)?;
            if similarity >= self.config.threshold {
                findings.push(self.finding(current, &current_paths, record, similarity));
            } else {
                debug!(
                    "{} ({}) below threshold: {similarity:.3}",
                    record.name, record.id
                );
            }
        }

        findings.sort_by_key(|finding| Reverse(finding.overlap));

        info!(
            "Compared {title} against {} APIs with {} ({}), found {} duplicates",
            candidates.len(),
            self.provider.name(),
            self.config.embedding_model,
            findings.len()
        );
        Ok(findings)
    }

    fn finding(
        &self,
        current: &ApiSpec,
        current_paths: &IndexSet<String>,
        record: &ExistingApiRecord,
        similarity: f32,
    ) -> DuplicateFinding {
        let overlap = overlap_percentage(similarity);
        let endpoints = count_overlap(current_paths, &record.spec.path_set()).total();

        DuplicateFinding {
            name: record.name.clone(),
            api_id: record.id.clone(),
            overlap,
            endpoints,
            recommendation: Recommendation::for_overlap(overlap)
                .message(current.title(), &record.name),
            details: overlap_details(current, &record.spec),
        }
    }

    /// The record's embedding: cached if the model matches, computed
    /// otherwise, or a zero vector if computing it fails.
    async fn record_embedding(&self, record: &ExistingApiRecord, dimension: usize) -> Embedding {
        if let Some(vector) = record
            .embedding
            .as_ref()
            .and_then(|cached| cached.vector_for(&self.config.embedding_model))
        {
            debug!("Using cached embedding for {} ({})", record.name, record.id);
            return vector.clone();
        }

        match self.embed_text(&summarize(&record.spec)).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!(
                    "Failed to embed {} ({}), scoring as zero similarity: {e}",
                    record.name, record.id
                );
                zero_vector(dimension)
            }
        }
    }

    async fn embed_text(&self, text: &str) -> std::result::Result<Embedding, EmbeddingError> {
        let request = EmbeddingRequest::new(text).with_model(self.config.embedding_model.as_str());

        match tokio::time::timeout(self.config.request_timeout(), self.provider.embed(request))
            .await
        {
            Ok(response) => Ok(response?.embedding),
            Err(_) => Err(EmbeddingError::Timeout {
                secs: self.config.request_timeout_secs,
            }),
        }
    }
}
