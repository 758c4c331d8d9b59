use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Listing, PropertyType};

/// Search criteria for listings.
///
/// Every field has a neutral value (empty string, `0`, empty list) that
/// switches its predicate off, and a missing field deserializes to it. A
/// numeric bound `<= 0` therefore means "no bound", never "exactly zero";
/// negative and `null` bounds deserialize to `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    /// Case-insensitive substring of city, state, full address or title
    pub location: String,
    /// Inclusive minimum price
    #[serde(deserialize_with = "lenient_bound")]
    pub price_min: u64,
    /// Inclusive maximum price
    #[serde(deserialize_with = "lenient_bound")]
    pub price_max: u64,
    /// Inclusive minimum number of bedrooms
    #[serde(deserialize_with = "lenient_bound")]
    pub bedrooms_min: u32,
    /// Inclusive minimum number of bathrooms
    #[serde(deserialize_with = "lenient_bound")]
    pub bathrooms_min: u32,
    /// Allowed categories
    pub property_type: Vec<PropertyType>,
}

/// Fold a signed bound into the unsigned field: anything `<= 0` is neutral.
pub fn neutral_bound<T: TryFrom<i64> + Default>(raw: i64) -> Option<T> {
    if raw <= 0 {
        return Some(T::default());
    }
    T::try_from(raw).ok()
}

fn lenient_bound<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    match Option::<i64>::deserialize(deserializer)? {
        None => Ok(T::default()),
        Some(raw) => neutral_bound(raw)
            .ok_or_else(|| D::Error::custom(format!("bound {} is out of range", raw))),
    }
}

impl SearchFilters {
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_price_min(mut self, price_min: u64) -> Self {
        self.price_min = price_min;
        self
    }

    pub fn with_price_max(mut self, price_max: u64) -> Self {
        self.price_max = price_max;
        self
    }

    pub fn with_bedrooms_min(mut self, bedrooms_min: u32) -> Self {
        self.bedrooms_min = bedrooms_min;
        self
    }

    pub fn with_bathrooms_min(mut self, bathrooms_min: u32) -> Self {
        self.bathrooms_min = bathrooms_min;
        self
    }

    pub fn with_property_types(mut self, types: impl IntoIterator<Item = PropertyType>) -> Self {
        self.property_type = types.into_iter().collect();
        self
    }

    /// Add the category if absent, drop it if present.
    pub fn toggle_property_type(&mut self, kind: PropertyType) {
        if let Some(pos) = self.property_type.iter().position(|t| *t == kind) {
            self.property_type.remove(pos);
        } else {
            self.property_type.push(kind);
        }
    }

    /// Reset every field to its neutral value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no predicate is active.
    pub fn is_neutral(&self) -> bool {
        self.location.is_empty()
            && self.price_min == 0
            && self.price_max == 0
            && self.bedrooms_min == 0
            && self.bathrooms_min == 0
            && self.property_type.is_empty()
    }

    /// Evaluate every active predicate against one listing.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_location(listing)
            && (self.price_min == 0 || listing.price >= self.price_min)
            && (self.price_max == 0 || listing.price <= self.price_max)
            && (self.bedrooms_min == 0 || listing.bedrooms >= self.bedrooms_min)
            && (self.bathrooms_min == 0 || listing.bathrooms >= self.bathrooms_min)
            && (self.property_type.is_empty() || self.property_type.contains(&listing.property_type))
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        if self.location.is_empty() {
            return true;
        }
        let needle = self.location.to_lowercase();
        listing
            .location_haystacks()
            .iter()
            .any(|haystack| haystack.contains(&needle))
    }
}
