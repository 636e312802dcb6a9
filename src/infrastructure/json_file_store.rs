// JSON file store - the whole db.json document is rewritten after each change
use crate::application::store::{Collection, CollectionStore, ListQuery, StoreError};
use crate::infrastructure::collections::Collections;
use crate::infrastructure::seed::seed_collections;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: RwLock<Collections>,
}

impl JsonFileStore {
    /// Open `path`, starting from an empty document if the file does not exist.
    /// With `seed`, an empty document is filled with the sample data and written out.
    pub async fn open(path: impl AsRef<Path>, seed: bool) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut tables = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Collections::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Collections::default(),
            Err(err) => return Err(err.into()),
        };

        if seed && tables.is_empty() {
            tables = seed_collections();
            write_document(&path, &tables).await?;
            tracing::info!(path = %path.display(), "seeded json store");
        }
        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, tables: &Collections) -> Result<(), StoreError> {
        write_document(&self.path, tables).await
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn write_document(path: &Path, tables: &Collections) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(tables)?;
    let mut temp = path.as_os_str().to_os_string();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&temp, content).await?;
    tokio::fs::rename(&temp, path).await?;
    Ok(())
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Value>, StoreError> {
        Ok(self.tables.read().await.list(collection, query))
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.tables.read().await.get(collection, id))
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        let created = next.insert(collection, record)?;
        self.persist(&next).await?;
        *tables = next;
        Ok(created)
    }

    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        let Some(patched) = next.patch(collection, id, changes) else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *tables = next;
        Ok(Some(patched))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        if !next.remove(collection, id) {
            return Ok(false);
        }
        self.persist(&next).await?;
        *tables = next;
        Ok(true)
    }
}
