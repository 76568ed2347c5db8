//! # Favorites Repository
//!
//! The liked items under the `favorites` key.

use shopfront_core::{FavoriteItem, Favorites};

use crate::error::StoreResult;
use crate::keys::StoreKey;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct FavoritesRepository {
    storage: Storage,
}

impl FavoritesRepository {
    pub fn new(storage: Storage) -> Self {
        FavoritesRepository { storage }
    }

    pub async fn load(&self) -> StoreResult<Favorites> {
        let items = self
            .storage
            .get::<Vec<FavoriteItem>>(StoreKey::Favorites)
            .await?
            .unwrap_or_default();

        Ok(Favorites::from_items(items))
    }

    pub async fn save(&self, favorites: &Favorites) -> StoreResult<()> {
        self.storage.set(StoreKey::Favorites, favorites.items()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use shopfront_core::ItemId;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_toggle_persists() {
        let repo = Storage::memory().favorites();
        let item = FavoriteItem {
            id: ItemId::new(9),
            name: "Chair".to_string(),
            price: shopfront_core::Money::from_cents(12000),
            image: String::new(),
        };

        let mut favorites = repo.load().await.unwrap();
        favorites.toggle(item);
        repo.save(&favorites).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert!(loaded.contains(ItemId::new(9)));
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_stored_duplicates_collapse() {
        let raw = r#"[{"id":1,"name":"A","price":100,"image":""},{"id":1,"name":"A","price":100,"image":""}]"#;
        let storage = Storage::new(Arc::new(MemoryStore::with_entries([("favorites", raw)])));

        assert_eq!(storage.favorites().load().await.unwrap().len(), 1);
    }
}
