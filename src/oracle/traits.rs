//! Geocoding oracle trait

use crate::results::Address;
use crate::search::BoundingBox;
use async_trait::async_trait;

/// Text to candidate-address lookup, optionally biased toward a box.
///
/// Both queries may return `Ok(None)` to mean "no list", which callers treat
/// as zero results. An `Err` means the lookup itself failed.
#[async_trait]
pub trait GeocodingOracle: Send + Sync {
    /// Oracle name, used in logs and stats
    fn name(&self) -> &str;

    /// Whether the oracle can be used on this host
    fn is_available(&self) -> bool {
        true
    }

    /// Search constrained to a bounding box
    async fn query_biased(
        &self,
        text: &str,
        max_results: usize,
        bbox: &BoundingBox,
    ) -> anyhow::Result<Option<Vec<Address>>>;

    /// Search with no geographic constraint
    async fn query_unbiased(
        &self,
        text: &str,
        max_results: usize,
    ) -> anyhow::Result<Option<Vec<Address>>>;
}
