// Shared fixtures for service tests
use crate::application::repository::Repository;
use crate::application::store::{Collection, CollectionStore, ListQuery, StoreError};
use crate::infrastructure::memory_store::MemoryStore;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_clock(timestamp_ms: i64) -> Arc<FixedClock> {
    let now = Utc
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .expect("valid fixture timestamp");
    Arc::new(FixedClock(now))
}

pub fn seeded_repository() -> Repository {
    Repository::new(Arc::new(MemoryStore::seeded()), Arc::new(DefaultClock))
}

pub fn empty_repository() -> Repository {
    Repository::new(Arc::new(MemoryStore::new()), Arc::new(DefaultClock))
}

/// Memory store whose patches fail for one record id until healed.
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: Mutex<Option<String>>,
}

impl FailingStore {
    pub fn heal(&self) {
        *self.fail_on.lock().unwrap() = None;
    }

    fn should_fail(&self, id: &str) -> bool {
        self.fail_on.lock().unwrap().as_deref() == Some(id)
    }
}

#[async_trait]
impl CollectionStore for FailingStore {
    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        self.inner.list(collection, query).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        self.inner.create(collection, record).await
    }

    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        if self.should_fail(id) {
            return Err(StoreError::Unavailable(format!("injected failure for {}", id)));
        }
        self.inner.patch(collection, id, changes).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        self.inner.delete(collection, id).await
    }
}

pub fn failing_repository(fail_on: &str) -> (Repository, Arc<FailingStore>) {
    let store = Arc::new(FailingStore {
        inner: MemoryStore::seeded(),
        fail_on: Mutex::new(Some(fail_on.to_string())),
    });
    let repository = Repository::new(store.clone(), Arc::new(DefaultClock));
    (repository, store)
}
