//! # Duplicate Detection
//!
//! Finds previously analyzed APIs that look like near-duplicates of a new
//! one.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Duplicate Detection                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ApiSpec ──► summarize ──► EmbeddingProvider ──► cosine         │
//! │                                                   │             │
//! │  ApiStore ──► ExistingApiRecord ──────────────────┤             │
//! │                                                   ▼             │
//! │               overlap (paths, schemas) ──► DuplicateFinding     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use apiscope_duplicates::{DetectorConfig, DuplicateDetector};
//! use apiscope_embeddings::OpenAIProvider;
//!
//! let detector = DuplicateDetector::new(
//!     Arc::new(OpenAIProvider::new()),
//!     DetectorConfig::default().with_threshold(0.8),
//! )?;
//! let findings = detector.find_duplicates(&spec, &records).await?;
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod overlap;
pub mod recommendation;
pub mod record;
pub mod store;

pub use config::DetectorConfig;
pub use detector::{DuplicateDetector, overlap_percentage};
pub use error::{DuplicateError, Result};
pub use overlap::{OverlapCount, count_overlap, overlap_details, paths_similar};
pub use recommendation::Recommendation;
pub use record::{DuplicateFinding, ExistingApiRecord};
pub use store::{ApiStore, InMemoryApiStore};
