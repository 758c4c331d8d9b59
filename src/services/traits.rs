use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::{parse_id, Favorite, Listing};
use crate::services::types::SearchFilters;

/// Read-only access to the listing collection
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Every listing, in collection order
    async fn get_all(&self) -> Vec<Listing>;

    /// The listing with this id, or `NotFound`
    async fn get_by_id(&self, id: u32) -> StoreResult<Listing>;

    /// Listings matching every active filter, in collection order
    async fn search(&self, filters: &SearchFilters) -> Vec<Listing>;

    /// Like `get_by_id`, for ids that arrive as text. Non-numeric text matches nothing.
    async fn get_by_raw_id(&self, raw: &str) -> StoreResult<Listing> {
        match parse_id(raw) {
            Some(id) => self.get_by_id(id).await,
            None => Err(StoreError::property_not_found(raw)),
        }
    }
}

/// Bookmarks over listings
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Every favorite record
    async fn get_all(&self) -> Vec<Favorite>;

    /// Favorited listings that still resolve in the listing source
    async fn get_favorite_properties(&self) -> Vec<Listing>;

    /// Bookmark a listing; returns the existing record if already bookmarked.
    /// Fails only when no id is left above the current maximum.
    async fn add(&self, property_id: u32) -> StoreResult<Favorite>;

    /// Drop the bookmark for a listing, or `NotFound`
    async fn remove(&self, property_id: u32) -> StoreResult<Favorite>;

    async fn is_favorite(&self, property_id: u32) -> bool;

    async fn add_raw(&self, raw: &str) -> StoreResult<Favorite> {
        let id = parse_id(raw).ok_or_else(|| StoreError::InvalidId(raw.to_string()))?;
        self.add(id).await
    }

    async fn remove_raw(&self, raw: &str) -> StoreResult<Favorite> {
        match parse_id(raw) {
            Some(id) => self.remove(id).await,
            None => Err(StoreError::favorite_not_found(raw)),
        }
    }

    async fn is_favorite_raw(&self, raw: &str) -> bool {
        match parse_id(raw) {
            Some(id) => self.is_favorite(id).await,
            None => false,
        }
    }
}
