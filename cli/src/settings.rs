//! Settings file handling.
//!
//! Precedence, highest first: command-line flags (and their environment
//! variables), the settings file, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use apiscope_duplicates::DetectorConfig;
use apiscope_embeddings::{EmbeddingProvider, OpenAIProvider};

/// Contents of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Detector tuning.
    pub detector: DetectorConfig,

    /// Embedding service access.
    pub openai: OpenAISettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Override for the API base URL.
    pub base_url: Option<String>,

    /// Used only when `OPENAI_API_KEY` is not set.
    pub api_key: Option<String>,
}

impl Settings {
    /// Default settings location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("apiscope").join("config.toml"))
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// read if present and defaults are used otherwise.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => path,
                _ => {
                    debug!("No settings file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line overrides to the detector configuration.
    pub fn detector_config(&self, threshold: Option<f32>, model: Option<&str>) -> DetectorConfig {
        let mut config = self.detector.clone();
        if let Some(threshold) = threshold {
            config.threshold = threshold;
        }
        if let Some(model) = model {
            config.embedding_model = model.to_string();
        }
        config
    }

    /// Build the embedding provider.
    pub fn provider(&self, model: &str) -> OpenAIProvider {
        let mut provider = OpenAIProvider::new().with_model(model);
        if let Some(base_url) = &self.openai.base_url {
            provider = provider.with_base_url(base_url.as_str());
        }
        // A key in the environment wins over one in the file.
        if !provider.is_available()
            && let Some(key) = &self.openai.api_key
        {
            provider = provider.with_api_key(key.as_str());
        }
        provider
    }
}
