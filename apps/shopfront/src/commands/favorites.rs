//! # Favorites Commands

use serde::Serialize;
use shopfront_core::{CoreError, FavoriteItem, Favorites, ItemId};
use shopfront_store::Storage;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::{CartState, FavoritesState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub items: Vec<FavoriteItem>,
    pub count: usize,
}

impl From<&Favorites> for FavoritesResponse {
    fn from(favorites: &Favorites) -> Self {
        FavoritesResponse {
            items: favorites.items().to_vec(),
            count: favorites.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Whether the item is a favorite after the toggle.
    pub is_favorite: bool,
    pub favorites: FavoritesResponse,
}

pub fn get_favorites(favorites: &FavoritesState) -> FavoritesResponse {
    favorites.with_favorites(|f| FavoritesResponse::from(f))
}

/// Adds the item to favorites, or removes it if already there.
///
/// The item is looked up in the catalog first, then among cart lines.
pub async fn toggle_favorite(
    storage: &Storage,
    config: &AppConfig,
    cart: &CartState,
    favorites: &FavoritesState,
    product_id: ItemId,
) -> Result<ToggleResponse, ApiError> {
    debug!(product_id = %product_id, "toggle_favorite command");

    let item = config
        .find_product(product_id)
        .map(FavoriteItem::from)
        .or_else(|| cart.with_cart(|c| c.get(product_id).map(FavoriteItem::from)))
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let previous = favorites.snapshot();
    let is_favorite = favorites.with_favorites_mut(|f| f.toggle(item));
    let current = favorites.snapshot();

    if let Err(e) = storage.favorites().save(&current).await {
        favorites.replace(previous);
        return Err(e.into());
    }

    Ok(ToggleResponse {
        is_favorite,
        favorites: FavoritesResponse::from(&current),
    })
}
