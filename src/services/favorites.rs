use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::models::{Favorite, Listing};
use crate::services::latency::{Call, Latency};
use crate::services::traits::{FavoriteStore, PropertySource};

/// Outcome of flipping a listing's bookmark
#[derive(Debug, Clone, PartialEq)]
pub enum Toggled {
    Added(Favorite),
    Removed(Favorite),
}

/// In-memory favorites, resolved against a listing source.
///
/// Mutations take the write lock for their whole duration, so concurrent
/// callers are applied one at a time.
pub struct FavoriteService {
    favorites: RwLock<Vec<Favorite>>,
    properties: Arc<dyn PropertySource>,
    latency: Latency,
}

impl FavoriteService {
    pub fn new(properties: Arc<dyn PropertySource>) -> Self {
        Self::with_seed(properties, Vec::new())
    }

    pub fn with_seed(properties: Arc<dyn PropertySource>, seed: Vec<Favorite>) -> Self {
        Self {
            favorites: RwLock::new(seed),
            properties,
            latency: Latency::none(),
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Remove the bookmark if present, add it otherwise.
    pub async fn toggle(&self, property_id: u32) -> StoreResult<Toggled> {
        let mut favorites = self.favorites.write().await;
        match favorites.iter().position(|f| f.property_id == property_id) {
            Some(index) => {
                self.latency.wait(Call::RemoveFavorite).await;
                let removed = favorites.remove(index);
                info!("Removed property {} from favorites", property_id);
                Ok(Toggled::Removed(removed))
            }
            None => {
                self.latency.wait(Call::AddFavorite).await;
                let favorite = Favorite::new(next_id(&favorites)?, property_id);
                favorites.push(favorite.clone());
                info!("Added property {} to favorites", property_id);
                Ok(Toggled::Added(favorite))
            }
        }
    }
}

fn next_id(favorites: &[Favorite]) -> StoreResult<u32> {
    let max = favorites.iter().map(|f| f.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(StoreError::IdsExhausted {
        entity: "favorite",
        max,
    })
}

#[async_trait]
impl FavoriteStore for FavoriteService {
    async fn get_all(&self) -> Vec<Favorite> {
        self.latency.wait(Call::FavoritesGetAll).await;
        self.favorites.read().await.clone()
    }

    async fn get_favorite_properties(&self) -> Vec<Listing> {
        self.latency.wait(Call::FavoriteProperties).await;
        let wanted: HashSet<u32> = self
            .favorites
            .read()
            .await
            .iter()
            .map(|f| f.property_id)
            .collect();

        let listings: Vec<Listing> = self
            .properties
            .get_all()
            .await
            .into_iter()
            .filter(|listing| wanted.contains(&listing.id))
            .collect();

        if listings.len() < wanted.len() {
            warn!(
                "{} favorite(s) point at listings that no longer exist",
                wanted.len() - listings.len()
            );
        }
        debug!("Resolved {} favorite properties", listings.len());
        listings
    }

    async fn add(&self, property_id: u32) -> StoreResult<Favorite> {
        self.latency.wait(Call::AddFavorite).await;
        let mut favorites = self.favorites.write().await;

        if let Some(existing) = favorites.iter().find(|f| f.property_id == property_id) {
            debug!("Property {} is already a favorite", property_id);
            return Ok(existing.clone());
        }

        let favorite = Favorite::new(next_id(&favorites)?, property_id);
        favorites.push(favorite.clone());
        info!("Added property {} to favorites (id {})", property_id, favorite.id);
        Ok(favorite)
    }

    async fn remove(&self, property_id: u32) -> StoreResult<Favorite> {
        self.latency.wait(Call::RemoveFavorite).await;
        let mut favorites = self.favorites.write().await;

        let index = favorites
            .iter()
            .position(|f| f.property_id == property_id)
            .ok_or_else(|| StoreError::favorite_not_found(property_id))?;

        let removed = favorites.remove(index);
        info!("Removed property {} from favorites", property_id);
        Ok(removed)
    }

    async fn is_favorite(&self, property_id: u32) -> bool {
        self.latency.wait(Call::IsFavorite).await;
        self.favorites
            .read()
            .await
            .iter()
            .any(|f| f.property_id == property_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{austin_and_dallas, listing};
    use crate::models::PropertyType;
    use crate::services::property::PropertyService;

    fn service() -> FavoriteService {
        FavoriteService::new(Arc::new(PropertyService::new(austin_and_dallas())))
    }

    #[tokio::test]
    async fn test_favorites_scenario() {
        let favorites = service();

        let added = favorites.add(1).await.unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(added.property_id, 1);
        assert!(favorites.is_favorite(1).await);

        let properties = favorites.get_favorite_properties().await;
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].id, 1);

        let removed = favorites.remove(1).await.unwrap();
        assert_eq!(removed, added);
        assert!(!favorites.is_favorite(1).await);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let favorites = service();
        let first = favorites.add(2).await.unwrap();
        let second = favorites.add(2).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(favorites.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_state() {
        let favorites = service();
        favorites.add(1).await.unwrap();
        let before = favorites.get_all().await;

        favorites.add(2).await.unwrap();
        favorites.remove(2).await.unwrap();
        assert_eq!(favorites.get_all().await, before);

        let err = favorites.remove(2).await.unwrap_err();
        assert_eq!(err, StoreError::favorite_not_found(2));
    }

    #[tokio::test]
    async fn test_ids_follow_max_existing() {
        let seed = vec![Favorite::new(4, 1), Favorite::new(2, 2)];
        let favorites = FavoriteService::with_seed(
            Arc::new(PropertyService::new(austin_and_dallas())),
            seed,
        );
        assert_eq!(favorites.add(7).await.unwrap().id, 5);

        favorites.remove(1).await.unwrap();
        assert_eq!(favorites.add(8).await.unwrap().id, 6);
    }

    #[tokio::test]
    async fn test_add_fails_when_ids_run_out() {
        let favorites = FavoriteService::with_seed(
            Arc::new(PropertyService::new(austin_and_dallas())),
            vec![Favorite::new(u32::MAX, 1)],
        );

        let err = favorites.add(2).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::IdsExhausted {
                entity: "favorite",
                max: u32::MAX
            }
        );
        assert!(favorites.toggle(2).await.is_err());
        assert_eq!(favorites.get_all().await.len(), 1);

        // Existing bookmarks are still returned and removable
        assert_eq!(favorites.add(1).await.unwrap().id, u32::MAX);
        favorites.remove(1).await.unwrap();
        assert_eq!(favorites.add(2).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_join_drops_dangling_and_keeps_listing_order() {
        let properties = Arc::new(PropertyService::new(vec![
            listing(1, 100_000, 1, PropertyType::Condo, "Austin"),
            listing(2, 200_000, 2, PropertyType::House, "Dallas"),
            listing(3, 300_000, 3, PropertyType::House, "Houston"),
        ]));
        let favorites = FavoriteService::new(properties);
        favorites.add(3).await.unwrap();
        favorites.add(42).await.unwrap();
        favorites.add(1).await.unwrap();

        let ids: Vec<u32> = favorites
            .get_favorite_properties()
            .await
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(favorites.get_all().await.len(), 3);
    }

    #[tokio::test]
    async fn test_raw_ids() {
        let favorites = service();
        assert_eq!(favorites.add_raw("2").await.unwrap().property_id, 2);
        assert!(favorites.is_favorite_raw("2").await);
        assert!(!favorites.is_favorite_raw("two").await);
        assert!(matches!(
            favorites.add_raw("two").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(favorites.remove_raw("two").await.unwrap_err().is_not_found());
        assert_eq!(favorites.remove_raw("2").await.unwrap().property_id, 2);
    }

    #[tokio::test]
    async fn test_toggle() {
        let favorites = service();
        let added = match favorites.toggle(1).await.unwrap() {
            Toggled::Added(f) => f,
            other => panic!("expected add, got {:?}", other),
        };
        assert!(favorites.is_favorite(1).await);

        assert_eq!(favorites.toggle(1).await.unwrap(), Toggled::Removed(added));
        assert!(!favorites.is_favorite(1).await);
    }

    #[tokio::test]
    async fn test_concurrent_adds_do_not_duplicate() {
        let favorites = Arc::new(service());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let favorites = Arc::clone(&favorites);
                tokio::spawn(async move { favorites.add(1).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().id, 1);
        }
        assert_eq!(favorites.get_all().await.len(), 1);
    }
}
