//! # Application Configuration
//!
//! ## Configuration Sources (later wins)
//! 1. Defaults (this file)
//! 2. Config file: `SHOPFRONT_CONFIG`, else `<config dir>/shopfront.toml`
//! 3. Environment variables (`SHOPFRONT_*`)
//!
//! ## Configuration File Format
//! ```toml
//! currency_symbol = "$"
//! seed_demo_session = false
//!
//! [store]
//! backend = "sqlite"          # sqlite | memory
//! database_path = "/tmp/shopfront.db"
//!
//! [delays]
//! after_register_ms = 1500
//! already_registered_ms = 3000
//! after_login_ms = 1500
//! unknown_email_ms = 3000
//! after_logout_ms = 500
//! after_reset_ms = 1500
//!
//! [[catalog]]
//! id = 1
//! name = "Canvas Tote"
//! price = 1899                # cents
//! image = "/images/tote.png"
//! ```
//!
//! Read-only after startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopfront_core::{validate_catalog, ItemId, Money, Product, ValidationError};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_PATH_VAR: &str = "SHOPFRONT_CONFIG";

/// Credentials written by `seed_demo_session`.
pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid store backend '{0}'. Valid options: sqlite, memory")]
    InvalidBackend(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(#[from] ValidationError),

    #[error("No data directory available for the database")]
    NoDataDir,
}

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    /// Nothing survives the process.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,

    /// Defaults to `<data dir>/shopfront.db`.
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// Transition Delays
// =============================================================================

/// Delay before each timed navigation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionDelays {
    /// Registration accepted → `/login`
    pub after_register_ms: u64,
    /// Email already registered → `/login`
    pub already_registered_ms: u64,
    /// Login succeeded → `/home`
    pub after_login_ms: u64,
    /// Unknown email at login → `/register`
    pub unknown_email_ms: u64,
    /// Logout → `/login`
    pub after_logout_ms: u64,
    /// Data reset → `/register`
    pub after_reset_ms: u64,
}

impl Default for TransitionDelays {
    fn default() -> Self {
        TransitionDelays {
            after_register_ms: 1500,
            already_registered_ms: 3000,
            after_login_ms: 1500,
            unknown_email_ms: 3000,
            after_logout_ms: 500,
            after_reset_ms: 1500,
        }
    }
}

impl TransitionDelays {
    pub fn after_register(&self) -> Duration {
        Duration::from_millis(self.after_register_ms)
    }

    pub fn already_registered(&self) -> Duration {
        Duration::from_millis(self.already_registered_ms)
    }

    pub fn after_login(&self) -> Duration {
        Duration::from_millis(self.after_login_ms)
    }

    pub fn unknown_email(&self) -> Duration {
        Duration::from_millis(self.unknown_email_ms)
    }

    pub fn after_logout(&self) -> Duration {
        Duration::from_millis(self.after_logout_ms)
    }

    pub fn after_reset(&self) -> Duration {
        Duration::from_millis(self.after_reset_ms)
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSettings,

    /// Prefix for displayed prices.
    pub currency_symbol: String,

    pub delays: TransitionDelays,

    /// Products offered on the home screen.
    pub catalog: Vec<Product>,

    /// Write a demo session at startup when none exists.
    pub seed_demo_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store: StoreSettings::default(),
            currency_symbol: "$".to_string(),
            delays: TransitionDelays::default(),
            catalog: demo_catalog(),
            seed_demo_session: false,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then the config file if present, then env overrides.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                Self::from_toml(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `SHOPFRONT_*` overrides read through `var`.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("SHOPFRONT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.store.database_path = Some(PathBuf::from(path));
        }

        if let Some(backend) = var("SHOPFRONT_STORE") {
            self.store.backend = backend.parse()?;
            debug!(backend = ?self.store.backend, "Overriding store backend from environment");
        }

        if let Some(symbol) = var("SHOPFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(flag) = var("SHOPFRONT_SEED_DEMO_SESSION") {
            self.seed_demo_session = matches!(
                flag.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        Ok(())
    }

    /// The configured database path, or the platform data directory.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.store.database_path {
            return Ok(path.clone());
        }

        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.data_dir().join("shopfront.db"))
            .ok_or(ConfigError::NoDataDir)
    }

    pub fn find_product(&self, id: ItemId) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join("shopfront.toml"))
    }
}

fn demo_catalog() -> Vec<Product> {
    [
        (1, "Canvas Tote", 1899, "/images/tote.png"),
        (2, "Ceramic Mug", 1250, "/images/mug.png"),
        (3, "Desk Lamp", 4500, "/images/lamp.png"),
        (4, "Notebook", 799, "/images/notebook.png"),
        (5, "Wool Scarf", 2999, "/images/scarf.png"),
    ]
    .into_iter()
    .map(|(id, name, cents, image)| Product {
        id: ItemId::new(id),
        name: name.to_string(),
        price: Money::from_cents(cents),
        image: image.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.delays.after_logout(), Duration::from_millis(500));
        assert!(!config.seed_demo_session);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            currency_symbol = "€"

            [delays]
            after_login_ms = 10

            [[catalog]]
            id = 7
            name = "Poster"
            price = 500
            image = ""
            "#,
        )
        .unwrap();

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.delays.after_login_ms, 10);
        assert_eq!(config.delays.already_registered_ms, 3000);
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.format_price(Money::from_cents(500)), "€5.00");
        assert!(config.find_product(ItemId::new(7)).is_some());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(vars(&[
                ("SHOPFRONT_STORE", "Memory"),
                ("SHOPFRONT_DB_PATH", "/tmp/x.db"),
                ("SHOPFRONT_SEED_DEMO_SESSION", "true"),
            ]))
            .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/x.db"));
        assert!(config.seed_demo_session);
    }

    #[test]
    fn test_invalid_backend_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(vars(&[("SHOPFRONT_STORE", "redis")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackend(_)));
    }

    #[test]
    fn test_duplicate_catalog_ids_rejected() {
        let mut config = AppConfig::default();
        let first = config.catalog[0].clone();
        config.catalog.push(first);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCatalog(_))
        ));
    }
}
