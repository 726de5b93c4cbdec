//! geosearch-rs: region-biased location search over a pluggable geocoder
//!
//! A search first asks the geocoder for matches inside the caller's map
//! region, then tops the list up with unconstrained matches, dropping any
//! that duplicate a local hit.

pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod network;
pub mod oracle;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::SearchError;
pub use oracle::GeocodingOracle;
pub use results::{Address, FormattedLocation};
pub use search::{BoundingRegion, SearchDispatcher, SearchOrchestrator};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of locations a search returns
pub const MAX_RESULTS: usize = 10;
