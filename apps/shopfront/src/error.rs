//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  Shell event (add 42)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule Error? ─── CoreError::ItemNotInCart ──────► ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The shell shows `message` as a banner. Nothing here is fatal.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup failures (config, opening the store, terminal I/O) are a separate
//! [`AppError`]; those end the process.

use serde::Serialize;
use shopfront_core::CoreError;
use shopfront_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// ```json
/// { "code": "CART_ERROR", "message": "Item 42 is not in the cart" }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or route
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Store operation failed
    StorageError,

    /// The auth flow does not allow this action now
    BusinessLogic,

    /// Cart operation failed
    CartError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            StoreError::Encode { key, source } => {
                tracing::error!(key = %key, "Failed to encode stored value: {}", source);
                ApiError::internal("Could not save data")
            }
            StoreError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage is unavailable")
            }
            StoreError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StoreError::QueryFailed(e) => {
                tracing::error!("Store query failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::PoolExhausted => ApiError::new(ErrorCode::StorageError, "Storage is busy"),
            StoreError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotInCart(id) => {
                ApiError::cart(format!("Item {} is not in the cart", id))
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id.to_string()),
            CoreError::CartTooLarge { max } => {
                ApiError::cart(format!("Cart cannot have more than {} items", max))
            }
            e @ CoreError::InvalidTransition { .. } => {
                tracing::debug!("Rejected auth event: {}", e);
                ApiError::new(ErrorCode::BusinessLogic, "That action is not available right now")
            }
            CoreError::UnknownRoute(path) => ApiError::not_found("Page", &path),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Startup failed: {0}")]
    Startup(#[from] ApiError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
