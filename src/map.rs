//! Map view model: viewport center and placeholder marker layout.
//!
//! Marker positions are a fixed grid by index, not a projection of the
//! listing coordinates. Only the viewport center uses real coordinates.

use serde::Serialize;

use crate::format::format_price_compact;
use crate::models::{Coordinates, Listing};

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 47.6062,
    lng: -122.3321,
};
pub const DEFAULT_ZOOM: u8 = 11;

const MARKERS_PER_ROW: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub property_id: u32,
    pub x: u32,
    pub y: u32,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Lay out `listings`, selecting the first one.
    pub fn new(listings: &[Listing]) -> Self {
        Self::with_selection(listings, listings.first().map(|l| l.id))
    }

    pub fn with_selection(listings: &[Listing], selected: Option<u32>) -> Self {
        let markers = listings
            .iter()
            .enumerate()
            .map(|(index, listing)| {
                let (x, y) = grid_position(index);
                Marker {
                    property_id: listing.id,
                    x,
                    y,
                    label: format_price_compact(listing.price),
                    selected: selected == Some(listing.id),
                }
            })
            .collect();

        Self {
            center: center_of(listings),
            zoom: DEFAULT_ZOOM,
            markers,
        }
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.selected)
    }

    /// Move the selection to `property_id`. Returns false if no marker has that id.
    pub fn select(&mut self, property_id: u32) -> bool {
        if !self.markers.iter().any(|m| m.property_id == property_id) {
            return false;
        }
        for marker in &mut self.markers {
            marker.selected = marker.property_id == property_id;
        }
        true
    }
}

/// Midpoint of the bounding box around `listings`, or the default center when empty.
pub fn center_of(listings: &[Listing]) -> Coordinates {
    if listings.is_empty() {
        return DEFAULT_CENTER;
    }

    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
    for Coordinates { lat, lng } in listings.iter().map(|l| l.coordinates) {
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
        min_lng = min_lng.min(lng);
        max_lng = max_lng.max(lng);
    }

    Coordinates {
        lat: (min_lat + max_lat) / 2.0,
        lng: (min_lng + max_lng) / 2.0,
    }
}

fn grid_position(index: usize) -> (u32, u32) {
    let col = (index % MARKERS_PER_ROW) as u32;
    let row = (index / MARKERS_PER_ROW) as u32;
    (50 + col * 200, 100 + row * 150)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::listing;
    use crate::models::PropertyType;

    fn listings(n: u32) -> Vec<Listing> {
        (1..=n)
            .map(|id| listing(id, 100_000 * u64::from(id), 2, PropertyType::House, "Austin"))
            .collect()
    }

    #[test]
    fn test_empty_map_uses_default_center() {
        let map = MapView::new(&[]);
        assert_eq!(map.center, DEFAULT_CENTER);
        assert_eq!(map.zoom, DEFAULT_ZOOM);
        assert!(map.markers.is_empty());
        assert!(map.selected().is_none());
    }

    #[test]
    fn test_center_is_bounding_box_midpoint() {
        // fixture coordinates: lat = 30 + id, lng = -97 - id
        let center = center_of(&listings(3));
        assert!((center.lat - 32.0).abs() < 1e-9);
        assert!((center.lng + 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_marker_grid() {
        let map = MapView::new(&listings(6));
        let positions: Vec<(u32, u32)> = map.markers.iter().map(|m| (m.x, m.y)).collect();
        assert_eq!(
            positions,
            vec![(50, 100), (250, 100), (450, 100), (650, 100), (50, 250), (250, 250)]
        );
        assert_eq!(map.markers[2].label, "$300K");
    }

    #[test]
    fn test_selection() {
        let mut map = MapView::new(&listings(3));
        assert_eq!(map.selected().map(|m| m.property_id), Some(1));

        assert!(map.select(3));
        assert_eq!(map.selected().map(|m| m.property_id), Some(3));
        assert_eq!(map.markers.iter().filter(|m| m.selected).count(), 1);

        assert!(!map.select(99));
        assert_eq!(map.selected().map(|m| m.property_id), Some(3));
    }
}
