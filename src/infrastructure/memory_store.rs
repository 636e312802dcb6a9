// In-memory store, used for tests and throwaway runs
use crate::application::store::{Collection, CollectionStore, ListQuery, StoreError};
use crate::infrastructure::collections::Collections;
use crate::infrastructure::seed::seed_collections;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(collections: Collections) -> Self {
        Self {
            tables: RwLock::new(collections),
        }
    }

    /// Store pre-filled with the sample dashboards, charts and chart data.
    pub fn seeded() -> Self {
        Self::with_collections(seed_collections())
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        Ok(self.tables.read().await.list(collection, query))
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.tables.read().await.get(collection, id))
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        self.tables.write().await.insert(collection, record)
    }

    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        Ok(self.tables.write().await.patch(collection, id, changes))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.remove(collection, id))
    }
}
