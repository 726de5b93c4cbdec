//! OpenStreetMap Nominatim oracle

use super::traits::GeocodingOracle;
use crate::config::OracleSettings;
use crate::network::{HttpClient, OracleRequest, OracleResponse};
use crate::results::Address;
use crate::search::BoundingBox;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// A single place in a Nominatim `jsonv2` search response
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: String,
}

impl NominatimPlace {
    fn into_address(self) -> Result<Address> {
        let latitude: f64 = self
            .lat
            .parse()
            .with_context(|| format!("invalid latitude '{}'", self.lat))?;
        let longitude: f64 = self
            .lon
            .parse()
            .with_context(|| format!("invalid longitude '{}'", self.lon))?;

        // display_name starts with the feature itself
        let feature_name = match self.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => self
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        };

        let mut address = Address::new(feature_name, latitude, longitude);
        if !self.display_name.is_empty() {
            address = address.with_line(self.display_name);
        }
        Ok(address)
    }
}

/// Nominatim-backed geocoder
pub struct Nominatim {
    client: HttpClient,
    search_url: Url,
    language: String,
    enabled: bool,
}

impl Nominatim {
    pub fn new(client: HttpClient, settings: &OracleSettings) -> Result<Self> {
        let base = settings.nominatim.base_url.trim_end_matches('/');
        let search_url = Url::parse(&format!("{}/search", base))
            .with_context(|| format!("invalid Nominatim base URL '{}'", base))?;

        Ok(Self {
            client,
            search_url,
            language: settings.nominatim.language.clone(),
            enabled: settings.enabled,
        })
    }

    fn request(&self, text: &str, max_results: usize) -> OracleRequest {
        OracleRequest::get(self.search_url.as_str())
            .param("q", text)
            .param("format", "jsonv2")
            .param("limit", max_results.to_string())
            .param("addressdetails", "0")
            .param("accept-language", &self.language)
    }

    async fn fetch(&self, request: OracleRequest) -> Result<Option<Vec<Address>>> {
        let response = self.client.execute(request).await?;
        let addresses = Self::parse(response)?;
        debug!("Nominatim returned {} places", addresses.len());
        Ok(Some(addresses))
    }

    fn parse(response: OracleResponse) -> Result<Vec<Address>> {
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        let places: Vec<NominatimPlace> = response.json()?;
        places.into_iter().map(NominatimPlace::into_address).collect()
    }
}

#[async_trait]
impl GeocodingOracle for Nominatim {
    fn name(&self) -> &str {
        "nominatim"
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
        // viewbox is x1,y1,x2,y2 in lon/lat order
        let viewbox = format!(
            "{},{},{},{}",
            bbox.min_lon, bbox.max_lat, bbox.max_lon, bbox.min_lat
        );
        let request = self
            .request(text, max_results)
            .param("viewbox", viewbox)
            .param("bounded", "1");

        self.fetch(request).await
    }

    async fn query_unbiased(&self, text: &str, max_results: usize) -> Result<Option<Vec<Address>>> {
        self.fetch(self.request(text, max_results)).await
    }
}
