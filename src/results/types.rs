//! Result type definitions

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A candidate address returned by a geocoding oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Name of the matched feature (may be empty)
    #[serde(default)]
    pub feature_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable address lines, most specific first
    #[serde(default)]
    pub address_lines: Vec<String>,
}

impl Address {
    /// Create an address without any address lines
    pub fn new(feature_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            feature_name: feature_name.into(),
            latitude,
            longitude,
            address_lines: Vec::new(),
        }
    }

    /// Append an address line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.address_lines.push(line.into());
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// First address line, or the empty string when there is none
    pub fn first_line(&self) -> &str {
        self.address_lines.first().map(String::as_str).unwrap_or("")
    }

    /// Exact coordinate equality, no tolerance.
    #[allow(clippy::float_cmp)]
    pub fn same_position(&self, other: &Address) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

/// The externally visible shape of a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedLocation {
    pub name: String,
    pub location: Coordinates,
    pub address: String,
}

impl From<&Address> for FormattedLocation {
    fn from(address: &Address) -> Self {
        Self {
            name: address.feature_name.clone(),
            location: address.coordinates(),
            address: address.first_line().to_string(),
        }
    }
}

/// Project a single address into its formatted shape
pub fn format_address(address: &Address) -> FormattedLocation {
    FormattedLocation::from(address)
}

/// Project a sequence of addresses, preserving order
pub fn format_addresses(addresses: &[Address]) -> Vec<FormattedLocation> {
    addresses.iter().map(format_address).collect()
}
