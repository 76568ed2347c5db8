//! # Cart
//!
//! The ordered list of purchase-intent items and its arithmetic.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action            Operation                  Effect                 │
//! │  ─────────            ─────────                  ──────                 │
//! │                                                                         │
//! │  Add to cart ───────► add_item(product) ───────► push or quantity += 1  │
//! │                                                                         │
//! │  + / - buttons ─────► change_quantity(id, δ) ──► quantity = max(q+δ, 1) │
//! │                                                                         │
//! │  ✕ button ──────────► remove_item(id) ─────────► line filtered out      │
//! │                                                                         │
//! │  Drawer footer ─────► total() ─────────────────► Σ price × quantity     │
//! │                                                                         │
//! │  NOTE: every mutation is persisted by the caller right away.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, ItemId, Product};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same product increases quantity)
/// - `1 <= quantity <= MAX_ITEM_QUANTITY` on every line
/// - At most `MAX_CART_ITEMS` lines
///
/// Serializes as a bare JSON list of lines, the shape stored under `cart`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from stored lines.
    ///
    /// Lines with a zero quantity are lifted to 1 so the invariant holds
    /// even for hand-edited data.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let items = items
            .into_iter()
            .map(|mut item| {
                item.quantity = item.quantity.clamp(1, MAX_ITEM_QUANTITY);
                item
            })
            .collect();
        Cart { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1 (capped at the maximum)
    /// - Product not in cart: appended as a new line with quantity 1
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity = (item.quantity + 1).min(MAX_ITEM_QUANTITY);
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product));
        Ok(())
    }

    /// Changes a line's quantity by `delta`.
    ///
    /// The new quantity is `old + delta` clamped to `1..=MAX_ITEM_QUANTITY`:
    /// a delta that would go below 1 leaves the quantity at 1 and never
    /// removes the line.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{Cart, CartItem, ItemId, Money};
    ///
    /// let mut cart = Cart::from_items(vec![CartItem {
    ///     id: ItemId::new(1),
    ///     name: "Mug".into(),
    ///     price: Money::from_cents(1000),
    ///     quantity: 2,
    ///     image: String::new(),
    /// }]);
    ///
    /// assert_eq!(cart.change_quantity(ItemId::new(1), -5).unwrap(), 1);
    /// assert_eq!(cart.change_quantity(ItemId::new(1), 3).unwrap(), 4);
    /// assert!(cart.change_quantity(ItemId::new(9), 1).is_err());
    /// ```
    ///
    /// ## Returns
    /// The resulting quantity, or `ItemNotInCart` for an unknown id.
    pub fn change_quantity(&mut self, id: ItemId, delta: i64) -> CoreResult<u32> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;

        let requested = i64::from(item.quantity).saturating_add(delta);
        let clamped = requested.clamp(1, i64::from(MAX_ITEM_QUANTITY));
        // Clamped into 1..=999, so the conversion cannot fail.
        item.quantity = u32::try_from(clamped).unwrap_or(1);

        Ok(item.quantity)
    }

    /// Removes a line entirely.
    ///
    /// ## Returns
    /// The removed line, or `None` if the id was not in the cart.
    pub fn remove_item(&mut self, id: ItemId) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines (the badge on the cart icon).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Σ price × quantity over all lines; zero for an empty cart.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
