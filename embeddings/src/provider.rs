//! Embedding providers.
//!
//! The duplicate detector only depends on the [`EmbeddingProvider`] trait;
//! [`OpenAIProvider`] is the HTTP implementation used in production.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EmbeddingError, Result};
use crate::{DEFAULT_DIMENSION, DEFAULT_MODEL, Embedding};

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// One text to embed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Usually an API summary.
    pub text: String,

    /// Overrides the provider's default model.
    pub model: Option<String>,
}

impl EmbeddingRequest {
    /// Embed `text` with the provider's default model.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Embed with `model` instead of the default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A single embedding returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The vector.
    pub embedding: Embedding,

    /// Model that produced the vector, as reported by the provider.
    pub model: String,

    /// Length of `embedding`.
    pub dimension: usize,

    /// Prompt tokens billed, when reported.
    pub tokens_used: Option<u64>,
}

/// Turns text into vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Model used when a request names none.
    fn default_model(&self) -> &str;

    /// Vector length produced by the default model.
    fn default_dimension(&self) -> usize;

    /// Embed one text.
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Whether [`embed`](Self::embed) can be called, e.g. credentials are present.
    fn is_available(&self) -> bool;
}

/// Client for the OpenAI `/embeddings` endpoint.
pub struct OpenAIProvider {
    api_key: Option<String>,

    /// Without a trailing slash.
    base_url: String,

    client: reqwest::Client,

    default_model: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider, reading the key from `OPENAI_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: "https://api.openai.com/v1".to_string(),
            client: reqwest::Client::new(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Use `key` instead of the environment.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point at a compatible server, e.g. a proxy or a test double.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Change the model used when a request names none.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn default_dimension(&self) -> usize {
        match self.default_model.as_str() {
            "text-embedding-3-large" => 3072,
            "text-embedding-3-small" | "text-embedding-ada-002" => 1536,
            _ => DEFAULT_DIMENSION,
        }
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(EmbeddingError::ProviderNotConfigured)?;

        let model = request.model.unwrap_or_else(|| self.default_model.clone());

        debug!(
            "Generating embedding for {} chars with model: {model}",
            request.text.len()
        );

        let body = serde_json::json!({
            "input": request.text,
            "model": model
        });

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after.as_deref(), &body));
        }

        let embedding = into_response(response.json().await?)?;
        debug!("Generated embedding with {} dimensions", embedding.dimension);
        Ok(embedding)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Map a non-success status to an error. 429 becomes
/// [`EmbeddingError::RateLimited`], waiting 60s when `retry-after` is
/// missing or not a number of seconds.
fn status_error(status: StatusCode, retry_after: Option<&str>, body: &str) -> EmbeddingError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = retry_after
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return EmbeddingError::RateLimited { retry_after_secs };
    }
    EmbeddingError::ApiRequest(format!("API error ({status}): {body}"))
}

/// Take the first vector of a decoded response.
fn into_response(result: OpenAIEmbeddingResponse) -> Result<EmbeddingResponse> {
    let embedding = result
        .data
        .into_iter()
        .next()
        .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding in response".to_string()))?
        .embedding;

    Ok(EmbeddingResponse {
        dimension: embedding.len(),
        embedding,
        model: result.model,
        tokens_used: result.usage.map(|u| u.total_tokens),
    })
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
    model: String,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    total_tokens: u64,
}
