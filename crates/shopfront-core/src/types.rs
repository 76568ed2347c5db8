//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    CartItem     │   │  FavoriteItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  email (unique) │   │  id             │   │  id (set key)   │       │
//! │  │  password       │   │  name, image    │   │  name, image    │       │
//! │  └─────────────────┘   │  price          │   │  price          │       │
//! │                        │  quantity (>=1) │   └─────────────────┘       │
//! │  ┌─────────────────┐   └─────────────────┘                             │
//! │  │    Session      │            ▲                    ▲                 │
//! │  │  ─────────────  │            └──── Product ───────┘                 │
//! │  │  email          │              (catalog entry)                      │
//! │  │  password       │                                                    │
//! │  │  logged_in_at   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are kept and shown in plaintext; this storefront has no
//! authentication security model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Item Identifier
// =============================================================================

/// Identifier shared by catalog products, cart lines and favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(u64);

impl ItemId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// ## Invariants
/// - No two stored users share an email
/// - Never mutated after registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive credential match.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

// =============================================================================
// Session
// =============================================================================

/// The locally cached data of the logged-in user.
///
/// Stored under the `user` key; absent when logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub email: String,
    pub password: String,
    #[ts(as = "String")]
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Starts a session for a user at the given instant.
    pub fn start(user: &User, at: DateTime<Utc>) -> Self {
        Session {
            email: user.email.clone(),
            password: user.password.clone(),
            logged_in_at: at,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry that cart lines and favorites are created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    /// Image reference (URL or asset path).
    pub image: String,
}

impl Product {
    /// Checks a catalog entry before it is offered for sale.
    ///
    /// ## Rules
    /// - Name must not be blank
    /// - Price must be non-negative (zero is a free item)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }

        if self.price.is_negative() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must not be negative".to_string(),
            });
        }

        Ok(())
    }
}

/// Validates a whole catalog: every entry and id uniqueness.
pub fn validate_catalog(products: &[Product]) -> Result<(), ValidationError> {
    for (index, product) in products.iter().enumerate() {
        product.validate()?;

        if products[..index].iter().any(|p| p.id == product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// ## Invariants
/// - `quantity >= 1`; a line leaves the cart only through removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub image: String,
}

impl CartItem {
    /// Creates a one-unit line for a product.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// Price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Favorite Item
// =============================================================================

/// A liked item. Membership in favorites is keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FavoriteItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub image: String,
}

impl From<&Product> for FavoriteItem {
    fn from(product: &Product) -> Self {
        FavoriteItem {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

impl From<&CartItem> for FavoriteItem {
    fn from(item: &CartItem) -> Self {
        FavoriteItem {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, price_cents: i64) -> Product {
        Product {
            id: ItemId::new(id),
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            image: format!("/img/{}.png", id),
        }
    }

    #[test]
    fn test_user_matches_exactly() {
        let user = User::new("a@gmail.com", "12345678");
        assert!(user.matches("a@gmail.com", "12345678"));
        assert!(!user.matches("A@gmail.com", "12345678"));
        assert!(!user.matches("a@gmail.com", "00000000"));
    }

    #[test]
    fn test_cart_item_line_total() {
        let mut item = CartItem::from_product(&product(1, 1000));
        item.quantity = 3;
        assert_eq!(item.line_total(), Money::from_cents(3000));
    }

    #[test]
    fn test_product_validation() {
        assert!(product(1, 0).validate().is_ok());
        assert!(product(1, -1).validate().is_err());

        let mut blank = product(2, 100);
        blank.name = "  ".to_string();
        assert!(matches!(
            blank.validate(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let catalog = vec![product(1, 100), product(2, 200), product(1, 300)];
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(validate_catalog(&catalog[..2]).is_ok());
    }

    #[test]
    fn test_cart_item_json_shape() {
        let item = CartItem::from_product(&product(1, 1000));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], 1000);
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn test_item_id_parse() {
        assert_eq!(" 42 ".parse::<ItemId>().unwrap(), ItemId::new(42));
        assert!("abc".parse::<ItemId>().is_err());
    }
}
