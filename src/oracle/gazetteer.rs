//! In-memory gazetteer oracle

use super::traits::GeocodingOracle;
use crate::config::GazetteerSettings;
use crate::results::Address;
use crate::search::BoundingBox;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// Oracle over a fixed list of places.
///
/// Matches are case-insensitive substrings of the feature name or any
/// address line, returned in list order.
pub struct Gazetteer {
    places: Vec<Address>,
    enabled: bool,
}

impl Gazetteer {
    pub fn new(places: Vec<Address>) -> Self {
        Self {
            places,
            enabled: true,
        }
    }

    /// Report the oracle as unavailable
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Inline places first, then the ones read from `path`
    pub fn from_settings(settings: &GazetteerSettings) -> Result<Self> {
        let mut places = settings.places.clone();
        if let Some(ref path) = settings.path {
            places.extend(Self::read_places(path)?);
        }
        Ok(Self::new(places))
    }

    fn read_places(path: &Path) -> Result<Vec<Address>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read gazetteer {}", path.display()))?;
        let places: Vec<Address> = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse gazetteer {}", path.display()))?;
        Ok(places)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    fn matching<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a Address> + 'a {
        let needle = text.trim().to_lowercase();
        self.places.iter().filter(move |place| {
            place.feature_name.to_lowercase().contains(&needle)
                || place
                    .address_lines
                    .iter()
                    .any(|line| line.to_lowercase().contains(&needle))
        })
    }
}

#[async_trait]
impl GeocodingOracle for Gazetteer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    async fn query_biased(
        &self,
        text: &str,
        max_results: usize,
        bbox: &BoundingBox,
    ) -> Result<Option<Vec<Address>>> {
        Ok(Some(
            self.matching(text)
                .filter(|place| bbox.contains(place.latitude, place.longitude))
                .take(max_results)
                .cloned()
                .collect(),
        ))
    }

    async fn query_unbiased(&self, text: &str, max_results: usize) -> Result<Option<Vec<Address>>> {
        Ok(Some(self.matching(text).take(max_results).cloned().collect()))
    }
}
