//! # Typed Storage
//!
//! JSON encoding on top of a [`KeyValueStore`], plus repository access.
//!
//! ## Read Semantics
//! ```text
//!   key absent            ──► Ok(None)
//!   key holds valid JSON  ──► Ok(Some(value))
//!   key holds garbage     ──► Ok(None)   (logged at WARN, left in place)
//!   backend failure       ──► Err(StoreError)
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let storage = Storage::memory();
//! storage.users().add(&User::new("a@gmail.com", "12345678")).await?;
//! let cart = storage.cart().load().await?;
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::keys::StoreKey;
use crate::kv::KeyValueStore;
use crate::memory::MemoryStore;
use crate::repository::{
    CartRepository, FavoritesRepository, LogRepository, SessionRepository, UserRepository,
};

/// Cheaply cloneable handle to the active backend.
#[derive(Debug, Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Storage { backend }
    }

    /// Storage over a fresh [`MemoryStore`].
    pub fn memory() -> Self {
        Storage::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Reads and decodes a key. Undecodable data reads as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: StoreKey) -> StoreResult<Option<T>> {
        let Some(raw) = self.backend.get(key.as_str()).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring undecodable stored value");
                Ok(None)
            }
        }
    }

    /// Encodes and writes a value, replacing what was there.
    pub async fn set<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.as_str().to_string(),
            source,
        })?;

        self.backend.set(key.as_str(), &raw).await
    }

    pub async fn remove(&self, key: StoreKey) -> StoreResult<()> {
        self.backend.remove(key.as_str()).await
    }

    /// Removes each key in order.
    pub async fn remove_all(&self, keys: &[StoreKey]) -> StoreResult<()> {
        for key in keys {
            self.remove(*key).await?;
        }
        debug!(count = keys.len(), "Removed keys");
        Ok(())
    }

    /// Releases the backend at shutdown.
    pub async fn close(&self) {
        self.backend.close().await;
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }

    pub fn session(&self) -> SessionRepository {
        SessionRepository::new(self.clone())
    }

    pub fn cart(&self) -> CartRepository {
        CartRepository::new(self.clone())
    }

    pub fn favorites(&self) -> FavoritesRepository {
        FavoritesRepository::new(self.clone())
    }

    pub fn logs(&self) -> LogRepository {
        LogRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::User;

    #[tokio::test]
    async fn test_absent_key_reads_none() {
        let storage = Storage::memory();
        let users: Option<Vec<User>> = storage.get(StoreKey::Users).await.unwrap();
        assert!(users.is_none());
    }

    #[tokio::test]
    async fn test_round_trip_value() {
        let storage = Storage::memory();
        let users = vec![User::new("a@gmail.com", "12345678")];

        storage.set(StoreKey::Users, &users).await.unwrap();

        let loaded: Option<Vec<User>> = storage.get(StoreKey::Users).await.unwrap();
        assert_eq!(loaded, Some(users));
    }

    #[tokio::test]
    async fn test_corrupted_value_reads_none() {
        let backend = Arc::new(MemoryStore::with_entries([("users", "{not json")]));
        let storage = Storage::new(backend.clone());

        let users: Option<Vec<User>> = storage.get(StoreKey::Users).await.unwrap();
        assert!(users.is_none());

        // The bad text is left alone until overwritten.
        assert_eq!(
            backend.get("users").await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_reads_none() {
        let storage = Storage::new(Arc::new(MemoryStore::with_entries([(
            "users",
            r#"{"email":"a@gmail.com"}"#,
        )])));

        let users: Option<Vec<User>> = storage.get(StoreKey::Users).await.unwrap();
        assert!(users.is_none());
    }

    #[tokio::test]
    async fn test_remove_all() {
        let storage = Storage::memory();
        for key in StoreKey::ALL {
            storage.set(key, &Vec::<u8>::new()).await.unwrap();
        }

        storage.remove_all(&StoreKey::RESETTABLE).await.unwrap();

        assert_eq!(storage.backend().keys().await.unwrap(), vec!["logs"]);
    }
}
