use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::seed;
use crate::services::{FavoriteService, InquiryService, PropertyService};

/// Stores owned by the entry point and handed out by reference
pub struct App {
    pub properties: Arc<PropertyService>,
    pub favorites: FavoriteService,
    pub inquiries: InquiryService,
}

impl App {
    /// Load the seed datasets named by `config` and build every store.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let listings = seed::load_listings(config.listings_path.as_deref())
            .await
            .context("Failed to load listing seed data")?;
        let favorites = seed::load_favorites(config.favorites_path.as_deref())
            .await
            .context("Failed to load favorites seed data")?;

        if config.latency.is_enabled() {
            info!("Simulated latency enabled");
        }

        let properties = Arc::new(PropertyService::with_latency(listings, config.latency));
        let favorites = FavoriteService::with_seed(properties.clone(), favorites)
            .with_latency(config.latency);

        Ok(Self {
            properties,
            favorites,
            inquiries: InquiryService::new(config.latency),
        })
    }
}
