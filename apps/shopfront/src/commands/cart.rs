//! # Cart Commands
//!
//! Every change is written to the `cart` key before the command returns.
//! If the write fails the in-memory cart is rolled back.

use serde::Serialize;
use shopfront_core::{Cart, CartItem, CoreError, ItemId, Money};
use shopfront_store::Storage;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::CartState;

/// Cart contents with badge count and total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    /// Distinct lines (the badge number).
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a catalog product.
///
/// ## Behavior
/// - Already in cart: quantity increases by one
/// - Not in cart: added as a new line with quantity 1
pub async fn add_to_cart(
    storage: &Storage,
    config: &AppConfig,
    cart: &CartState,
    product_id: ItemId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = config
        .find_product(product_id)
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let previous = cart.snapshot();
    cart.with_cart_mut(|c| c.add_item(product))?;

    persist(storage, cart, previous).await
}

/// Adds `delta` to a line's quantity, keeping it between 1 and the maximum.
pub async fn change_quantity(
    storage: &Storage,
    cart: &CartState,
    product_id: ItemId,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, delta, "change_quantity command");

    let previous = cart.snapshot();
    let quantity = cart.with_cart_mut(|c| c.change_quantity(product_id, delta))?;
    debug!(product_id = %product_id, quantity, "Quantity updated");

    persist(storage, cart, previous).await
}

/// Removes a line entirely. Removing an absent id changes nothing.
pub async fn remove_from_cart(
    storage: &Storage,
    cart: &CartState,
    product_id: ItemId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let previous = cart.snapshot();
    let removed = cart.with_cart_mut(|c| c.remove_item(product_id));
    if removed.is_none() {
        return Ok(CartResponse::from(&previous));
    }

    persist(storage, cart, previous).await
}

async fn persist(
    storage: &Storage,
    cart: &CartState,
    previous: Cart,
) -> Result<CartResponse, ApiError> {
    let current = cart.snapshot();

    if let Err(e) = storage.cart().save(&current).await {
        cart.replace(previous);
        return Err(e.into());
    }

    Ok(CartResponse::from(&current))
}
