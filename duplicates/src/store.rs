//! Storage of analyzed API records.
//!
//! The detector never writes to the store; callers use it to keep records
//! (and their cached embeddings) between scans.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{DuplicateError, Result};
use crate::record::ExistingApiRecord;

/// Keyed storage of API records.
#[async_trait]
pub trait ApiStore: Send + Sync {
    /// Get a record by identifier.
    async fn get(&self, id: &str) -> Result<Option<ExistingApiRecord>>;

    /// All records, in storage order.
    async fn list(&self) -> Result<Vec<ExistingApiRecord>>;

    /// Insert or replace a record.
    async fn put(&self, record: ExistingApiRecord) -> Result<()>;

    /// Delete a record. Fails with [`DuplicateError::NotFound`] if absent.
    async fn delete(&self, id: &str) -> Result<ExistingApiRecord>;

    /// First record with the given display name.
    async fn find_by_name(&self, name: &str) -> Result<Option<ExistingApiRecord>> {
        Ok(self.list().await?.into_iter().find(|r| r.name == name))
    }
}

/// An [`ApiStore`] kept in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryApiStore {
    records: RwLock<IndexMap<String, ExistingApiRecord>>,
}

impl InMemoryApiStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ApiStore for InMemoryApiStore {
    async fn get(&self, id: &str) -> Result<Option<ExistingApiRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<ExistingApiRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn put(&self, record: ExistingApiRecord) -> Result<()> {
        debug!("Storing API record: {} ({})", record.name, record.id);
        self.records.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<ExistingApiRecord> {
        let removed = self
            .records
            .write()
            .await
            .shift_remove(id)
            .ok_or_else(|| DuplicateError::NotFound(id.to_string()))?;
        info!("Deleted API record: {id}");
        Ok(removed)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ExistingApiRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.name == name)
            .cloned())
    }
}
