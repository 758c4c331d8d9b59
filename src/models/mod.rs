use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format::{format_thousands, format_price};

mod favorite;

pub use favorite::Favorite;

/// Category of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    House,
    Condo,
    Townhouse,
    Apartment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Apartment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown property type: {0}")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPropertyType(s.to_string()))
    }
}

/// Postal address of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    pub full: String,
}

/// Map position of a listing, used only for display placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "Id")]
    pub id: u32,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub square_feet: u32,
    pub property_type: PropertyType,
    pub address: Address,
    pub coordinates: Coordinates,
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub listing_date: NaiveDate,
}

/// One labelled figure from a listing's key facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

impl Listing {
    /// Bedrooms, bathrooms, floor area and category, in display order.
    pub fn stats(&self) -> Vec<Stat> {
        vec![
            Stat {
                label: "Bedrooms",
                value: self.bedrooms.to_string(),
            },
            Stat {
                label: "Bathrooms",
                value: self.bathrooms.to_string(),
            },
            Stat {
                label: "Square Feet",
                value: format_thousands(u64::from(self.square_feet)),
            },
            Stat {
                label: "Property Type",
                value: self.property_type.to_string(),
            },
        ]
    }

    /// One-line summary: title, price and address.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) - {}",
            self.title,
            format_price(self.price),
            self.address.full
        )
    }

    /// Lower-cased fields the location filter looks into.
    pub(crate) fn location_haystacks(&self) -> [String; 4] {
        [
            self.address.city.to_lowercase(),
            self.address.state.to_lowercase(),
            self.address.full.to_lowercase(),
            self.title.to_lowercase(),
        ]
    }
}

/// Coerce raw id text the way a lenient integer parse does.
///
/// Leading whitespace and a `+` sign are accepted and anything after the
/// leading digits is ignored, so `"12abc"` is 12. Text without leading
/// digits (including negative numbers, which never name a listing) is
/// non-numeric and yields `None`.
pub fn parse_id(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn listing(id: u32, price: u64, bedrooms: u32, kind: PropertyType, city: &str) -> Listing {
        Listing {
            id,
            title: format!("{} in {}", kind, city),
            description: String::new(),
            price,
            bedrooms,
            bathrooms: 1,
            square_feet: 1_200,
            property_type: kind,
            address: Address {
                street: format!("{} Main St", id),
                city: city.to_string(),
                state: "TX".to_string(),
                zip_code: "78701".to_string(),
                full: format!("{} Main St, {}, TX 78701", id, city),
            },
            coordinates: Coordinates {
                lat: 30.0 + f64::from(id),
                lng: -97.0 - f64::from(id),
            },
            images: vec![format!("https://images.example.com/{}.jpg", id)],
            amenities: vec![],
            listing_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    /// The Austin condo / Dallas house pair.
    pub fn austin_and_dallas() -> Vec<Listing> {
        vec![
            listing(1, 200_000, 2, PropertyType::Condo, "Austin"),
            listing(2, 500_000, 4, PropertyType::House, "Dallas"),
        ]
    }
}
