//! # Shopfront
//!
//! The storefront application: configuration, in-memory state, commands,
//! timed navigation and the terminal shell.
//!
//! ## Module Organization
//! ```text
//! shopfront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── AppConfig: defaults → TOML → env
//! ├── error.rs        ◄─── ApiError for commands, AppError for startup
//! ├── navigation.rs   ◄─── Navigator with cancellable pending transitions
//! ├── state/
//! │   ├── session.rs  ◄─── Auth phase + cached session
//! │   ├── cart.rs     ◄─── Cart state
//! │   └── favorites.rs◄─── Favorites state
//! ├── commands/
//! │   ├── auth.rs     ◄─── register, login, logout, reset
//! │   ├── cart.rs     ◄─── add, change quantity, remove
//! │   ├── favorites.rs◄─── toggle
//! │   └── profile.rs  ◄─── profile, activity log
//! └── shell/          ◄─── parse input, render screens, event loop
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod navigation;
pub mod shell;
pub mod state;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use shopfront_store::{MemoryStore, SqliteStore, Storage, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, StoreBackend};
use error::AppError;
use shell::Shell;

/// Runs the application until stdin closes or the user quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,shopfront=debug,sqlx=warn; override with RUST_LOG   │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • defaults → shopfront.toml → SHOPFRONT_* variables                 │
/// │                                                                         │
/// │  3. Open Store                                                          │
/// │     • SQLite file with WAL mode + migrations, or in-memory              │
/// │                                                                         │
/// │  4. Shell::startup                                                      │
/// │     • activity log line, optional demo session, load state              │
/// │                                                                         │
/// │  5. Event loop on stdin/stdout                                          │
/// │                                                                         │
/// │  6. Shutdown                                                            │
/// │     • `Session ended` log line, then the store is closed                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    info!("Starting Shopfront");

    let config = AppConfig::load(None)?;
    let storage = open_storage(&config).await?;

    let mut shell = Shell::startup(storage.clone(), config).await?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    shell.run(stdin, stdout).await?;

    commands::profile::record_activity(&storage, "Session ended", Utc::now()).await;
    storage.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with the rendered screen.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the configured backend.
pub async fn open_storage(config: &AppConfig) -> Result<Storage, AppError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store; nothing will be saved");
            Ok(Storage::new(Arc::new(MemoryStore::new())))
        }
        StoreBackend::Sqlite => {
            let path = get_database_path(config)?;
            info!(?path, "Database path determined");

            let store = SqliteStore::open(StoreConfig::new(path)).await?;
            Ok(Storage::new(Arc::new(store)))
        }
    }
}

/// Resolves the database path and creates its directory.
fn get_database_path(config: &AppConfig) -> Result<PathBuf, AppError> {
    let path = config.database_path()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_storage() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;

        let storage = open_storage(&config).await.unwrap();
        assert!(storage.users().list().await.unwrap().is_empty());
    }
}
