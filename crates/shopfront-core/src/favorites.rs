//! # Favorites
//!
//! A set of liked items keyed by id, kept in the order they were liked.
//! Independent of cart membership.

use serde::{Deserialize, Serialize};

use crate::types::{FavoriteItem, ItemId};

/// Liked items.
///
/// Serializes as a bare JSON list, the shape stored under `favorites`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    items: Vec<FavoriteItem>,
}

impl Favorites {
    pub fn new() -> Self {
        Favorites::default()
    }

    /// Rebuilds favorites from stored items, dropping repeated ids.
    pub fn from_items(items: Vec<FavoriteItem>) -> Self {
        let mut favorites = Favorites::new();
        for item in items {
            if !favorites.contains(item.id) {
                favorites.items.push(item);
            }
        }
        favorites
    }

    /// Adds the item if its id is absent, removes it otherwise.
    ///
    /// ## Returns
    /// `true` if the item is now a favorite.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{Favorites, FavoriteItem, ItemId, Money};
    ///
    /// let item = FavoriteItem {
    ///     id: ItemId::new(3),
    ///     name: "Lamp".into(),
    ///     price: Money::from_cents(4500),
    ///     image: String::new(),
    /// };
    ///
    /// let mut favorites = Favorites::new();
    /// assert!(favorites.toggle(item.clone()));
    /// assert!(!favorites.toggle(item));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, item: FavoriteItem) -> bool {
        match self.items.iter().position(|fav| fav.id == item.id) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|fav| fav.id == id)
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<FavoriteItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
