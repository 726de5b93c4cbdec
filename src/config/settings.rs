//! Settings structures for geosearch-rs configuration

use crate::results::Address;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure, mirrors settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub oracle: OracleSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the search pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        let max = self.search.max_results;
        if !(1..=crate::MAX_RESULTS).contains(&max) {
            bail!(
                "search.max_results must be between 1 and {}, got {}",
                crate::MAX_RESULTS,
                max
            );
        }
        Ok(())
    }

    /// Merge with environment variables (GEOSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("GEOSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("GEOSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("GEOSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("GEOSEARCH_ORACLE_BACKEND") {
            if let Ok(backend) = serde_yaml::from_str(&val) {
                self.oracle.backend = backend;
            }
        }
        if let Ok(val) = std::env::var("GEOSEARCH_NOMINATIM_URL") {
            self.oracle.nominatim.base_url = val;
        }
        if let Ok(val) = std::env::var("GEOSEARCH_LANGUAGE") {
            self.oracle.nominatim.language = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by /health and /stats
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "geosearch-rs".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Upper bound on merged results
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: crate::MAX_RESULTS,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8787,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Appended to the user agent, e.g. a contact address
    pub useragent_suffix: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            useragent_suffix: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Which oracle implementation to load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleBackend {
    #[default]
    Nominatim,
    Gazetteer,
}

/// Oracle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    pub backend: OracleBackend,
    /// Disabled oracles make every search fail as unavailable
    pub enabled: bool,
    pub nominatim: NominatimSettings,
    pub gazetteer: GazetteerSettings,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            backend: OracleBackend::default(),
            enabled: true,
            nominatim: NominatimSettings::default(),
            gazetteer: GazetteerSettings::default(),
        }
    }
}

/// Nominatim server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NominatimSettings {
    pub base_url: String,
    /// Preferred result language (accept-language)
    pub language: String,
}

impl Default for NominatimSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            language: "en".to_string(),
        }
    }
}

/// In-memory gazetteer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GazetteerSettings {
    /// YAML file holding a list of places
    pub path: Option<PathBuf>,
    /// Places declared inline
    pub places: Vec<Address>,
}
