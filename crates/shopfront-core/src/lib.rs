//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! This crate contains the storefront's business rules as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (apps/shopfront)                       │   │
//! │  │    Register ──► Login ──► Home (cart drawer, favorites)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────┐   │   │
//! │  │   │ validation │ │   cart   │ │ favorites │ │  auth/route  │   │   │
//! │  │   │  email     │ │ quantity │ │  toggle   │ │ state machine│   │   │
//! │  │   │  password  │ │  totals  │ │           │ │  screens     │   │   │
//! │  │   └────────────┘ └──────────┘ └───────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE ACCESS • NO TIMERS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shopfront-store (Key-Value Store Adapter)          │   │
//! │  │           users, user, cart, favorites, logs (JSON text)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, CartItem, FavoriteItem, Session, Product)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Credential rules and registration form checks
//! - [`cart`] - Cart quantity and total arithmetic
//! - [`favorites`] - Favorites membership
//! - [`auth`] - Registration/login state machine and decisions
//! - [`route`] - Screens and their paths
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Cart, CartItem, ItemId, Money};
//!
//! let mut cart = Cart::from_items(vec![CartItem {
//!     id: ItemId::new(1),
//!     name: "Mug".to_string(),
//!     price: Money::from_major_minor(10, 0),
//!     quantity: 2,
//!     image: "/img/mug.png".to_string(),
//! }]);
//!
//! cart.change_quantity(ItemId::new(1), -5).unwrap();
//! assert_eq!(cart.items()[0].quantity, 1);
//! assert_eq!(cart.total(), Money::from_cents(1000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod error;
pub mod favorites;
pub mod money;
pub mod route;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{AuthEvent, AuthPhase, LoginOutcome, RegistrationOutcome};
pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use favorites::Favorites;
pub use money::Money;
pub use route::Route;
pub use types::*;
pub use validation::{PasswordStrength, RegistrationErrors, RegistrationForm};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart.
///
/// Quantity changes above this value are clamped rather than rejected.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Minimum password length (passwords are digits only).
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The only email domain accepted at registration.
pub const REQUIRED_EMAIL_DOMAIN: &str = "gmail.com";
