//! Persistence adapters: in-memory (DashMap) and durable Sled with a hot cache.

use crate::error::StoreError;
use crate::ports::PersistencePort;
use async_trait::async_trait;
use dashmap::DashMap;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_STORE_PATH: &str = "./data/pillars";

fn blob_key(user_id: &str, key: &str) -> String {
    format!("{}:{}", user_id, key)
}

/// Volatile store. Used by tests and when no storage path is configured.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    blobs: Arc<DashMap<String, serde_json::Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs across all users.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl PersistencePort for InMemoryStore {
    async fn load(&self, user_id: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.blobs.get(&blob_key(user_id, key)).map(|v| v.clone()))
    }

    async fn save(&self, user_id: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.blobs.insert(blob_key(user_id, key), value);
        Ok(())
    }
}

/// Sled-backed store with an in-memory read cache.
///
/// Writes go to Sled first (flushed), then to the cache, so a failed write never
/// leaves a cached value that is not on disk.
pub struct SledStore {
    db: Db,
    /// Hot cache: `user_id:key` -> JSON bytes. Checked before Sled.
    cache: Arc<DashMap<String, Vec<u8>>>,
}

impl SledStore {
    /// Opens or creates a Sled database at `./data/pillars`.
    pub fn new() -> Result<Self, StoreError> {
        Self::open_path(DEFAULT_STORE_PATH)
    }

    /// Opens or creates a Sled database at the given path.
    ///
    /// Every write is flushed explicitly, so Sled's periodic flusher thread is disabled.
    /// Without that thread, dropping the store releases the file lock immediately and
    /// the path can be reopened in the same process.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::Config::new()
            .path(path)
            .flush_every_ms(None)
            .open()?;
        Ok(Self {
            db,
            cache: Arc::new(DashMap::new()),
        })
    }

    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(v) = self.cache.get(key) {
            return Ok(Some(v.clone()));
        }
        let out = self.db.get(key.as_bytes())?.map(|iv| iv.to_vec());
        if let Some(ref bytes) = out {
            self.cache.insert(key.to_string(), bytes.clone());
        }
        Ok(out)
    }

    fn put_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.db.insert(key.as_bytes(), bytes.as_slice())?;
        self.db.flush()?;
        self.cache.insert(key.to_string(), bytes);
        Ok(())
    }
}

#[async_trait]
impl PersistencePort for SledStore {
    async fn load(&self, user_id: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        match self.get_bytes(&blob_key(user_id, key))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&value)?;
        self.put_bytes(&blob_key(user_id, key), bytes)?;
        tracing::debug!(user_id, key, "blob persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn in_memory_scopes_by_user() {
        let store = InMemoryStore::new();
        store.save("alice", "progress", json!({"xp": 10})).await.unwrap();
        assert_eq!(store.load("alice", "progress").await.unwrap(), Some(json!({"xp": 10})));
        assert_eq!(store.load("bob", "progress").await.unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn sled_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SledStore::open_path(dir.path()).unwrap();
            store.save("u1", "dailyTasks", json!([1, 2, 3])).await.unwrap();
            assert_eq!(store.load("u1", "dailyTasks").await.unwrap(), Some(json!([1, 2, 3])));
        }
        let reopened = SledStore::open_path(dir.path()).unwrap();
        assert_eq!(reopened.load("u1", "dailyTasks").await.unwrap(), Some(json!([1, 2, 3])));
        assert_eq!(reopened.load("u1", "progress").await.unwrap(), None);
    }

    #[tokio::test]
    async fn sled_overwrites_whole_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open_path(dir.path()).unwrap();
        store.save("u1", "assessment", json!({"overallScore": 40})).await.unwrap();
        store.save("u1", "assessment", json!({"overallScore": 70})).await.unwrap();
        assert_eq!(
            store.load("u1", "assessment").await.unwrap(),
            Some(json!({"overallScore": 70}))
        );
    }
}
