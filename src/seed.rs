//! Static seed datasets.
//!
//! The bundled datasets are compiled into the binary; a path from the
//! configuration replaces them.

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::SeedError;
use crate::models::{Favorite, Listing};

pub const BUNDLED_LISTINGS: &str = include_str!("../data/properties.json");
pub const BUNDLED_FAVORITES: &str = include_str!("../data/favorites.json");

/// Parse and validate a listing dataset.
pub fn parse_listings(json: &str) -> Result<Vec<Listing>, SeedError> {
    let listings: Vec<Listing> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(listings.len());
    for listing in &listings {
        if !seen.insert(listing.id) {
            return Err(SeedError::DuplicateId {
                entity: "listing",
                id: listing.id,
            });
        }
        if listing.images.is_empty() {
            return Err(SeedError::MissingImages(listing.id));
        }
    }

    Ok(listings)
}

/// Parse a favorites dataset. Property ids are not checked against any listing set.
pub fn parse_favorites(json: &str) -> Result<Vec<Favorite>, SeedError> {
    let favorites: Vec<Favorite> = serde_json::from_str(json)?;

    let mut ids = HashSet::with_capacity(favorites.len());
    let mut properties = HashSet::with_capacity(favorites.len());
    for favorite in &favorites {
        if !ids.insert(favorite.id) {
            return Err(SeedError::DuplicateId {
                entity: "favorite",
                id: favorite.id,
            });
        }
        if !properties.insert(favorite.property_id) {
            return Err(SeedError::DuplicateId {
                entity: "favorite property",
                id: favorite.property_id,
            });
        }
    }

    Ok(favorites)
}

pub async fn load_listings(path: Option<&Path>) -> Result<Vec<Listing>, SeedError> {
    let listings = parse_listings(&read_or_bundled(path, BUNDLED_LISTINGS).await?)?;
    info!("Loaded {} listings", listings.len());
    Ok(listings)
}

pub async fn load_favorites(path: Option<&Path>) -> Result<Vec<Favorite>, SeedError> {
    let favorites = parse_favorites(&read_or_bundled(path, BUNDLED_FAVORITES).await?)?;
    info!("Loaded {} favorites", favorites.len());
    Ok(favorites)
}

async fn read_or_bundled(path: Option<&Path>, bundled: &str) -> Result<String, SeedError> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.display().to_string(),
                source,
            }),
        None => Ok(bundled.to_string()),
    }
}
