use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::models::Listing;
use crate::services::latency::{Call, Latency};
use crate::services::traits::PropertySource;
use crate::services::types::SearchFilters;

/// In-memory listing store, read-only after construction
pub struct PropertyService {
    listings: Vec<Listing>,
    latency: Latency,
}

impl PropertyService {
    /// Create a store over already validated listings
    pub fn new(listings: Vec<Listing>) -> Self {
        Self::with_latency(listings, Latency::none())
    }

    pub fn with_latency(listings: Vec<Listing>, latency: Latency) -> Self {
        Self { listings, latency }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    fn find(&self, id: u32) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }
}

#[async_trait]
impl PropertySource for PropertyService {
    async fn get_all(&self) -> Vec<Listing> {
        self.latency.wait(Call::GetAll).await;
        self.listings.clone()
    }

    async fn get_by_id(&self, id: u32) -> StoreResult<Listing> {
        self.latency.wait(Call::GetById).await;
        match self.find(id) {
            Some(listing) => Ok(listing.clone()),
            None => {
                warn!("Property {} not found", id);
                Err(StoreError::property_not_found(id))
            }
        }
    }

    async fn search(&self, filters: &SearchFilters) -> Vec<Listing> {
        self.latency.wait(Call::Search).await;
        debug!(?filters, "searching {} listings", self.listings.len());

        let results: Vec<Listing> = self
            .listings
            .iter()
            .filter(|listing| filters.matches(listing))
            .cloned()
            .collect();

        debug!("{} listings matched", results.len());
        results
    }
}
