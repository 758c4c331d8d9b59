pub mod favorites;
pub mod inquiry;
pub mod latency;
pub mod property;
pub mod traits;
pub mod types;

pub use favorites::{FavoriteService, Toggled};
pub use inquiry::{InquiryDraft, InquiryService};
pub use latency::Latency;
pub use property::PropertyService;
pub use traits::{FavoriteStore, PropertySource};
pub use types::SearchFilters;
