//! Listing browser core: an in-memory listing store with filtered search,
//! a favorites store joined back onto it, and the display helpers the
//! console front-end renders with.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod map;
pub mod models;
pub mod seed;
pub mod services;

pub use error::{SeedError, StoreError, StoreResult};
pub use models::{Favorite, Listing, PropertyType};
pub use services::{FavoriteService, FavoriteStore, PropertyService, PropertySource, SearchFilters};
