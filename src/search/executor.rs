//! Two-phase search execution

use super::models::{BoundingRegion, SearchQuery};
use crate::context::HostContext;
use crate::error::SearchError;
use crate::oracle::GeocodingOracle;
use crate::results::{dedup_against, format_addresses, merge_phases, Address, FormattedLocation};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs a local (box-biased) search, tops it up with a remote (unbiased)
/// search when short of results, and formats the merged list.
///
/// Holds no per-search state; one instance serves any number of
/// concurrent searches.
pub struct SearchOrchestrator {
    /// Geocoder used for both phases
    oracle: Arc<dyn GeocodingOracle>,
    /// Host session availability
    context: Arc<dyn HostContext>,
    /// Result cap, also the per-phase request size
    max_results: usize,
}

impl SearchOrchestrator {
    /// Create a new orchestrator capped at `MAX_RESULTS`
    pub fn new(oracle: Arc<dyn GeocodingOracle>, context: Arc<dyn HostContext>) -> Self {
        Self {
            oracle,
            context,
            max_results: crate::MAX_RESULTS,
        }
    }

    /// Set the result cap, clamped to `1..=MAX_RESULTS`
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        let clamped = max_results.clamp(1, crate::MAX_RESULTS);
        if clamped != max_results {
            warn!("Result cap {} out of range, using {}", max_results, clamped);
        }
        self.max_results = clamped;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Guard clauses, evaluated before any oracle call
    pub fn check_preconditions(&self) -> Result<(), SearchError> {
        if !self.context.has_active_context() {
            warn!("Rejecting search: no active host context");
            return Err(SearchError::ContextUnavailable);
        }
        if !self.oracle.is_available() {
            warn!("Rejecting search: oracle {} unavailable", self.oracle.name());
            return Err(SearchError::OracleUnavailable);
        }
        Ok(())
    }

    /// Search for locations matching `text`, preferring those inside `region`
    pub async fn search(
        &self,
        text: &str,
        region: &BoundingRegion,
    ) -> Result<Vec<FormattedLocation>, SearchError> {
        self.check_preconditions()?;
        self.run(&SearchQuery::new(text, *region)).await
    }

    /// Run the pipeline without re-checking the guards
    pub(crate) async fn run(&self, query: &SearchQuery) -> Result<Vec<FormattedLocation>, SearchError> {
        let addresses = self.collect(query).await.map_err(|e| {
            warn!("Search '{}' failed: {}", query.text, e);
            SearchError::from(e)
        })?;

        info!("Search '{}' returned {} results", query.text, addresses.len());
        Ok(format_addresses(&addresses))
    }

    async fn collect(&self, query: &SearchQuery) -> anyhow::Result<Vec<Address>> {
        let bbox = query.bounding_box();

        debug!("Local search for '{}' in {:?}", query.text, bbox);
        let local = self
            .oracle
            .query_biased(&query.text, self.max_results, &bbox)
            .await?
            .unwrap_or_default();

        if local.len() >= self.max_results {
            debug!("Local search filled all {} slots, skipping remote", local.len());
            return Ok(local);
        }

        debug!("Local search returned {}, searching remote", local.len());
        let remote = match self
            .oracle
            .query_unbiased(&query.text, self.max_results)
            .await?
        {
            Some(remote) => remote,
            None => {
                debug!("Remote search returned no list");
                return Ok(local);
            }
        };

        let remote = dedup_against(&local, remote);
        debug!("Remote search contributes {} after dedup", remote.len());

        Ok(merge_phases(local, remote, self.max_results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SessionContext;
    use crate::oracle::testing::{places, RecordingOracle, Reply};

    fn region() -> BoundingRegion {
        BoundingRegion::new(48.85, 2.35, 0.5, 0.5)
    }

    fn orchestrator(oracle: &Arc<RecordingOracle>) -> SearchOrchestrator {
        SearchOrchestrator::new(oracle.clone(), Arc::new(SessionContext::active()))
    }

    fn names(results: &[FormattedLocation]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_full_local_skips_remote() {
        let local = places("local", 0.0, 10);
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(local.clone()),
            Reply::List(places("remote", 50.0, 5)),
        ));

        let results = orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(oracle.biased(), 1);
        assert_eq!(oracle.unbiased(), 0);
        assert_eq!(results, format_addresses(&local));
    }

    #[tokio::test]
    async fn test_local_then_remote() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 3)),
            Reply::List(places("r", 50.0, 5)),
        ));

        let results = orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(oracle.unbiased(), 1);
        assert_eq!(
            names(&results),
            vec!["l0", "l1", "l2", "r0", "r1", "r2", "r3", "r4"]
        );
    }

    #[tokio::test]
    async fn test_both_phases_request_ten() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 3)),
            Reply::List(places("r", 50.0, 5)),
        ));

        orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(oracle.requested(), vec![("biased", 10), ("unbiased", 10)]);
    }

    #[tokio::test]
    async fn test_dedup_and_cap() {
        let local = places("l", 0.0, 3);
        let mut remote = places("r", 50.0, 7);
        // two remote hits sharing coordinates with local ones
        remote.insert(2, Address::new("dup-a", local[0].latitude, local[0].longitude));
        remote.insert(5, Address::new("dup-b", local[2].latitude, local[2].longitude));
        assert_eq!(remote.len(), 9);

        let oracle = Arc::new(RecordingOracle::new(Reply::List(local), Reply::List(remote)));
        let results = orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(results.len(), 10);
        assert_eq!(&names(&results)[..3], &["l0", "l1", "l2"]);
        assert!(!names(&results).contains(&"dup-a"));
        assert!(!names(&results).contains(&"dup-b"));
        assert_eq!(
            &names(&results)[3..],
            &["r0", "r1", "r2", "r3", "r4", "r5", "r6"]
        );
    }

    #[tokio::test]
    async fn test_cap_truncates_remote_in_order() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 6)),
            Reply::List(places("r", 50.0, 10)),
        ));

        let results = orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(results.len(), 10);
        assert_eq!(&names(&results)[6..], &["r0", "r1", "r2", "r3"]);
    }

    #[tokio::test]
    async fn test_empty_phases_are_success() {
        let oracle = Arc::new(RecordingOracle::new(Reply::List(vec![]), Reply::List(vec![])));

        let results = orchestrator(&oracle).search("nothing", &region()).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(oracle.unbiased(), 1);
    }

    #[tokio::test]
    async fn test_local_failure_aborts() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::Fail("geocoder offline".to_string()),
            Reply::List(places("r", 50.0, 5)),
        ));

        let err = orchestrator(&oracle).search("cafe", &region()).await.unwrap_err();

        assert_eq!(err, SearchError::OracleFailure("geocoder offline".to_string()));
        assert_eq!(oracle.unbiased(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_discards_local() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 2)),
            Reply::Fail("quota exceeded".to_string()),
        ));

        let err = orchestrator(&oracle).search("cafe", &region()).await.unwrap_err();

        assert_eq!(err.message(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_local_no_list_still_searches_remote() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::NoList,
            Reply::List(places("r", 50.0, 2)),
        ));

        let results = orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(oracle.unbiased(), 1);
        assert_eq!(names(&results), vec!["r0", "r1"]);
    }

    #[tokio::test]
    async fn test_remote_no_list_keeps_local() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 4)),
            Reply::NoList,
        ));

        let results = orchestrator(&oracle).search("cafe", &region()).await.unwrap();

        assert_eq!(names(&results), vec!["l0", "l1", "l2", "l3"]);
    }

    #[tokio::test]
    async fn test_negative_deltas_query_same_box() {
        let oracle = Arc::new(RecordingOracle::new(Reply::List(vec![]), Reply::NoList));
        let search = orchestrator(&oracle);

        search
            .search("x", &BoundingRegion::new(10.0, 10.0, -0.5, -0.5))
            .await
            .unwrap();
        let negative = oracle.last_bbox.lock().unwrap().unwrap();

        search
            .search("x", &BoundingRegion::new(10.0, 10.0, 0.5, 0.5))
            .await
            .unwrap();
        let positive = oracle.last_bbox.lock().unwrap().unwrap();

        assert_eq!(negative, positive);
        assert_eq!(negative.min_lat, 9.5);
    }

    #[tokio::test]
    async fn test_inactive_context_rejected_before_oracle() {
        let oracle = Arc::new(RecordingOracle::new(Reply::List(vec![]), Reply::List(vec![])));
        let search = SearchOrchestrator::new(oracle.clone(), Arc::new(SessionContext::new()));

        let err = search.search("cafe", &region()).await.unwrap_err();

        assert_eq!(err, SearchError::ContextUnavailable);
        assert_eq!(oracle.biased() + oracle.unbiased(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_oracle_rejected_before_oracle() {
        let oracle = Arc::new(
            RecordingOracle::new(Reply::List(vec![]), Reply::List(vec![])).unavailable(),
        );

        let err = orchestrator(&oracle).search("cafe", &region()).await.unwrap_err();

        assert_eq!(err, SearchError::OracleUnavailable);
        assert_eq!(oracle.biased(), 0);
    }

    #[tokio::test]
    async fn test_result_never_exceeds_cap() {
        for local_count in 0..=10 {
            for remote_count in [0, 1, 5, 10] {
                let local = places("l", 0.0, local_count);
                // every third remote hit collides with a local one
                let remote: Vec<_> = places("r", 50.0, remote_count)
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut a)| {
                        if i % 3 == 0 && i < local.len() {
                            a.latitude = local[i].latitude;
                            a.longitude = local[i].longitude;
                        }
                        a
                    })
                    .collect();

                let oracle = Arc::new(RecordingOracle::new(
                    Reply::List(local.clone()),
                    Reply::List(remote),
                ));
                let results = orchestrator(&oracle).search("q", &region()).await.unwrap();

                assert!(results.len() <= 10);
                assert_eq!(&results[..local.len()], &format_addresses(&local)[..]);
                for remote_hit in &results[local.len()..] {
                    assert!(!local
                        .iter()
                        .any(|l| l.latitude == remote_hit.location.latitude
                            && l.longitude == remote_hit.location.longitude));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_custom_cap() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 2)),
            Reply::List(places("r", 50.0, 5)),
        ));
        let search = orchestrator(&oracle).with_max_results(3);

        let results = search.search("cafe", &region()).await.unwrap();
        assert_eq!(names(&results), vec!["l0", "l1", "r0"]);
        assert_eq!(oracle.requested(), vec![("biased", 3), ("unbiased", 3)]);
    }

    #[tokio::test]
    async fn test_cap_clamped_to_range() {
        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 10)),
            Reply::List(places("r", 50.0, 10)),
        ));
        let search = orchestrator(&oracle).with_max_results(20);
        assert_eq!(search.max_results(), 10);

        let results = search.search("cafe", &region()).await.unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(oracle.unbiased(), 0);

        let oracle = Arc::new(RecordingOracle::new(
            Reply::List(places("l", 0.0, 3)),
            Reply::List(places("r", 50.0, 3)),
        ));
        let search = orchestrator(&oracle).with_max_results(0);
        assert_eq!(search.max_results(), 1);

        search.search("cafe", &region()).await.unwrap();
        assert_eq!(oracle.requested(), vec![("biased", 1)]);
    }
}
