//! # SQLite Backend
//!
//! A [`KeyValueStore`] persisted in a single `kv_entries` table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::new(path) ← Configure pool settings                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::open(config).await ← Create pool + run migrations         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_entries                                                             │
//! │  ┌────────────┬──────────────────────────────┬───────────────────────┐  │
//! │  │ key (PK)   │ value (JSON text)            │ updated_at (RFC 3339) │  │
//! │  ├────────────┼──────────────────────────────┼───────────────────────┤  │
//! │  │ users      │ [{"email":..,"password":..}] │ 2026-..               │  │
//! │  │ cart       │ [{"id":1,"quantity":2,..}]   │ 2026-..               │  │
//! │  └────────────┴──────────────────────────────┴───────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases use WAL journaling with NORMAL synchronous writes.
//! `:memory:` databases hold one connection that never expires, since each
//! new connection would see an empty database.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::migrations;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// SQLite backend configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/shopfront.db").max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Default: 4
    pub max_connections: u32,

    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration for a database file, created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 4,
            connect_timeout: Duration::from_secs(10),
            run_migrations: true,
        }
    }

    /// An isolated database that disappears with the pool.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the pool and applies migrations (if enabled).
    ///
    /// ## Returns
    /// * `Ok(SqliteStore)` - Ready-to-use store
    /// * `Err(StoreError)` - Connection or migration failed
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening key-value store"
        );

        let pool = if config.is_in_memory() {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(config.connect_timeout)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            let options = SqliteConnectOptions::new()
                .filename(&config.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.connect_timeout)
                .connect_with(options)
                .await
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        };

        debug!(max_connections = config.max_connections, "Store pool created");

        let store = SqliteStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Shorthand for `open(StoreConfig::in_memory())`.
    pub async fn in_memory() -> StoreResult<Self> {
        SqliteStore::open(StoreConfig::in_memory()).await
    }

    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    /// Closes the pool. Every later operation fails.
    async fn close(&self) {
        info!("Closing key-value store");
        self.pool.close().await;
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_entries ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_entries")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
