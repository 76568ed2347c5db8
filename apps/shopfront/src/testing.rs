//! Store doubles for command tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use shopfront_store::{KeyValueStore, MemoryStore, Storage, StoreError, StoreKey, StoreResult};

/// A memory store whose writes fail for selected keys.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    broken: Mutex<HashSet<String>>,
}

impl FlakyStore {
    /// Returns the store together with a `Storage` over it.
    pub fn storage() -> (Arc<FlakyStore>, Storage) {
        let store = Arc::new(FlakyStore::default());
        let storage = Storage::new(store.clone());
        (store, storage)
    }

    /// Makes every later write to `key` fail.
    pub fn break_writes(&self, key: StoreKey) {
        self.broken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.as_str().to_string());
    }

    fn check(&self, key: &str) -> StoreResult<()> {
        let broken = self.broken.lock().unwrap_or_else(PoisonError::into_inner);
        if broken.contains(key) {
            return Err(StoreError::QueryFailed(format!("disk full writing {}", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check(key)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.check(key)?;
        self.inner.remove(key).await
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        self.inner.keys().await
    }

    async fn clear(&self) -> StoreResult<()> {
        self.inner.clear().await
    }
}
