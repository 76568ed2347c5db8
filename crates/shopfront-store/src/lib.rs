//! # shopfront-store: Persistence for Shopfront
//!
//! A string-keyed store holding JSON values, with SQLite and in-memory
//! backends and a typed layer on top.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  Shell command (add 3)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shopfront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories │    │  Backends    │  │   │
//! │  │   │ (storage.rs)  │    │ users, cart,  │    │ SqliteStore  │  │   │
//! │  │   │ JSON get/set  │◄───│ favorites,    │    │ MemoryStore  │  │   │
//! │  │   │               │    │ session, logs │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/shopfront/shopfront.db  (kv_entries)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The [`KeyValueStore`] trait backends implement
//! - [`sqlite`] - SQLite backend and its configuration
//! - [`memory`] - In-memory backend
//! - [`storage`] - Typed JSON access with absent-on-garbage reads
//! - [`repository`] - Per-key repositories
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_store::{SqliteStore, Storage, StoreConfig};
//!
//! let backend = SqliteStore::open(StoreConfig::new("shopfront.db")).await?;
//! let storage = Storage::new(Arc::new(backend));
//! let users = storage.users().list().await?;
//! ```

pub mod error;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod migrations;
pub mod repository;
pub mod sqlite;
pub mod storage;

pub use error::{StoreError, StoreResult};
pub use keys::StoreKey;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use repository::{
    CartRepository, FavoritesRepository, LogRepository, SessionRepository, UserRepository,
};
pub use sqlite::{SqliteStore, StoreConfig};
pub use storage::Storage;
