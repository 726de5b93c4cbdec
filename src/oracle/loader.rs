//! Oracle loader for initializing the geocoder from configuration

use super::gazetteer::Gazetteer;
use super::nominatim::Nominatim;
use super::traits::GeocodingOracle;
use crate::config::{OracleBackend, Settings};
use crate::network::HttpClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for the configured oracle backend
pub struct OracleLoader;

impl OracleLoader {
    /// Build the oracle named by `settings.oracle.backend`
    pub fn load(settings: &Settings, client: HttpClient) -> Result<Arc<dyn GeocodingOracle>> {
        let oracle: Arc<dyn GeocodingOracle> = match settings.oracle.backend {
            OracleBackend::Nominatim => {
                let oracle = Nominatim::new(client, &settings.oracle)?;
                info!("Loaded Nominatim oracle at {}", settings.oracle.nominatim.base_url);
                Arc::new(oracle)
            }
            OracleBackend::Gazetteer => {
                let mut oracle = Gazetteer::from_settings(&settings.oracle.gazetteer)?;
                if !settings.oracle.enabled {
                    oracle = oracle.disabled();
                }
                if oracle.is_empty() {
                    warn!("Gazetteer oracle has no places; every search will be empty");
                }
                info!("Loaded gazetteer oracle with {} places", oracle.len());
                Arc::new(oracle)
            }
        };

        if !oracle.is_available() {
            warn!("Oracle {} is disabled", oracle.name());
        }

        Ok(oracle)
    }

    /// Get list of available backends
    pub fn available_backends() -> Vec<&'static str> {
        vec!["nominatim", "gazetteer"]
    }
}
