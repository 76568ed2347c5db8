//! # Cart Repository
//!
//! The cart lines under the `cart` key.

use shopfront_core::{Cart, CartItem};
use tracing::debug;

use crate::error::StoreResult;
use crate::keys::StoreKey;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct CartRepository {
    storage: Storage,
}

impl CartRepository {
    pub fn new(storage: Storage) -> Self {
        CartRepository { storage }
    }

    /// Loads the cart, clamping stored quantities into range.
    pub async fn load(&self) -> StoreResult<Cart> {
        let items = self
            .storage
            .get::<Vec<CartItem>>(StoreKey::Cart)
            .await?
            .unwrap_or_default();

        Ok(Cart::from_items(items))
    }

    /// Writes the entire cart.
    pub async fn save(&self, cart: &Cart) -> StoreResult<()> {
        self.storage.set(StoreKey::Cart, cart.items()).await?;
        debug!(lines = cart.item_count(), "Cart persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use shopfront_core::{ItemId, Money, Product};
    use std::sync::Arc;

    fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ItemId::new(id),
            name: format!("Item {}", id),
            price: Money::from_cents(cents),
            image: format!("/img/{}.png", id),
        }
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() {
        let repo = Storage::memory().cart();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = Storage::memory().cart();

        let mut cart = Cart::new();
        cart.add_item(&product(1, 250)).unwrap();
        cart.add_item(&product(1, 250)).unwrap();
        cart.add_item(&product(2, 1000)).unwrap();
        repo.save(&cart).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, cart);
        assert_eq!(loaded.total(), Money::from_cents(1500));
    }

    #[tokio::test]
    async fn test_stored_zero_quantity_is_clamped() {
        let raw = r#"[{"id":4,"name":"Mug","price":800,"quantity":0,"image":""}]"#;
        let storage = Storage::new(Arc::new(MemoryStore::with_entries([("cart", raw)])));

        let cart = storage.cart().load().await.unwrap();
        assert_eq!(cart.get(ItemId::new(4)).map(|i| i.quantity), Some(1));
    }

    #[tokio::test]
    async fn test_corrupted_cart_is_empty() {
        let storage = Storage::new(Arc::new(MemoryStore::with_entries([("cart", "[{")])));
        assert!(storage.cart().load().await.unwrap().is_empty());
    }
}
