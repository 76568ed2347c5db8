//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shopfront-store errors (separate crate)                               │
//! │  └── StoreError       - Key-value store failures                       │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the shell shows (code + message)          │
//! │                                                                         │
//! │  Flow: CoreError → ApiError → banner; ValidationError → form/config    │
//! │                         StoreError ─┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::auth::{AuthEvent, AuthPhase};
use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The cart has no line with this item id.
    #[error("Item {0} is not in the cart")]
    ItemNotInCart(ItemId),

    /// The product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ItemId),

    /// Cart has reached the maximum number of distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// The auth state machine does not accept this event in this phase.
    ///
    /// ## When This Occurs
    /// - Logging out while not logged in
    /// - Finishing a registration that never started
    #[error("Cannot apply {event:?} while {phase:?}")]
    InvalidTransition { phase: AuthPhase, event: AuthEvent },

    /// The path does not name a screen.
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., an email that is already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
