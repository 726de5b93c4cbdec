//! Geocoding oracle module
//!
//! Defines the GeocodingOracle trait and the backends that implement it.

mod loader;
mod traits;

pub mod gazetteer;
pub mod nominatim;

#[cfg(test)]
pub(crate) mod testing;

pub use gazetteer::Gazetteer;
pub use loader::OracleLoader;
pub use nominatim::Nominatim;
pub use traits::GeocodingOracle;
