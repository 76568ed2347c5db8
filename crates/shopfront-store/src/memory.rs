//! # In-Memory Store
//!
//! A `HashMap` backend. Used by tests and by `SHOPFRONT_STORE=memory`
//! sessions that should leave nothing behind.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-filled with raw entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> StoreResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("cart").await.unwrap(), None);

        store.set("cart", "[]").await.unwrap();
        store.set("cart", "[1]").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[1]"));

        store.remove("cart").await.unwrap();
        store.remove("cart").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_sorted_and_clear() {
        let store = MemoryStore::with_entries([("users", "[]"), ("cart", "[]")]);
        assert_eq!(store.keys().await.unwrap(), vec!["cart", "users"]);

        store.clear().await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }
}
