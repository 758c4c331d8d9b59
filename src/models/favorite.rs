use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmark pointing at a listing by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(rename = "Id")]
    pub id: u32,
    pub property_id: u32,
    pub added_date: DateTime<Utc>,
}

impl Favorite {
    /// Create a new favorite stamped with the current time
    pub fn new(id: u32, property_id: u32) -> Self {
        Self {
            id,
            property_id,
            added_date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_creation() {
        let before = Utc::now();
        let favorite = Favorite::new(1, 5);
        assert_eq!(favorite.id, 1);
        assert_eq!(favorite.property_id, 5);
        assert!(favorite.added_date >= before);
    }

    #[test]
    fn test_favorite_json_shape() {
        let json = r#"{"Id": 2, "propertyId": 9, "addedDate": "2024-03-01T12:00:00Z"}"#;
        let favorite: Favorite = serde_json::from_str(json).unwrap();
        assert_eq!(favorite.id, 2);
        assert_eq!(favorite.property_id, 9);
        assert_eq!(favorite.added_date.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }
}
