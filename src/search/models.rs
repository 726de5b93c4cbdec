//! Search query and region models

use serde::{Deserialize, Serialize};

/// A map viewport: center point plus latitude/longitude span.
///
/// Field names on the wire match what map widgets report
/// (`latitude`, `longitude`, `latitudeDelta`, `longitudeDelta`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    #[serde(rename = "latitude")]
    pub center_latitude: f64,
    #[serde(rename = "longitude")]
    pub center_longitude: f64,
    #[serde(rename = "latitudeDelta")]
    pub latitude_delta: f64,
    #[serde(rename = "longitudeDelta")]
    pub longitude_delta: f64,
}

impl BoundingRegion {
    pub fn new(
        center_latitude: f64,
        center_longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Self {
        Self {
            center_latitude,
            center_longitude,
            latitude_delta,
            longitude_delta,
        }
    }

    /// Rectangle spanning center ± |delta| on both axes
    pub fn bounding_box(&self) -> BoundingBox {
        let lat_delta = self.latitude_delta.abs();
        let lon_delta = self.longitude_delta.abs();

        BoundingBox {
            min_lat: self.center_latitude - lat_delta,
            min_lon: self.center_longitude - lon_delta,
            max_lat: self.center_latitude + lat_delta,
            max_lon: self.center_longitude + lon_delta,
        }
    }
}

/// Axis-aligned rectangle in latitude/longitude space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Inclusive containment check
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

/// A single location search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text input, passed to the oracle untouched
    pub text: String,
    pub region: BoundingRegion,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, region: BoundingRegion) -> Self {
        Self {
            text: text.into(),
            region,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.region.bounding_box()
    }
}
