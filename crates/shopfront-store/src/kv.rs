//! # Key-Value Store
//!
//! The persistent string-keyed store every backend implements.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Storage (typed, JSON)                                                 │
//! │        │  get::<Vec<User>>(StoreKey::Users)                             │
//! │        ▼                                                                 │
//! │   Arc<dyn KeyValueStore>  ── get / set / remove on raw text             │
//! │        │                                                                 │
//! │        ├── MemoryStore   (HashMap, tests and throwaway sessions)         │
//! │        └── SqliteStore   (kv_entries table in a local file)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends store text verbatim; they know nothing about JSON.

use async_trait::async_trait;

use crate::error::StoreResult;

#[async_trait]
pub trait KeyValueStore: std::fmt::Debug + Send + Sync {
    /// Returns the text stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// All keys currently stored, sorted.
    async fn keys(&self) -> StoreResult<Vec<String>>;

    /// Deletes every key.
    async fn clear(&self) -> StoreResult<()>;

    /// Releases backend resources at shutdown. Nothing to do by default.
    async fn close(&self) {}
}
