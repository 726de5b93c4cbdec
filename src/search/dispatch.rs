//! Off-thread dispatch with one-shot result delivery

use super::executor::SearchOrchestrator;
use super::models::{BoundingRegion, SearchQuery};
use crate::error::SearchError;
use crate::results::FormattedLocation;
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

const TERMINATED: &str = "search task terminated before delivering a result";

/// Error-or-result payload handed to bridge callers.
///
/// Exactly one of `error` and `result` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    error: Option<String>,
    result: Option<Vec<FormattedLocation>>,
}

impl SearchOutcome {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&[FormattedLocation]> {
        self.result.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }
}

impl From<Result<Vec<FormattedLocation>, SearchError>> for SearchOutcome {
    fn from(result: Result<Vec<FormattedLocation>, SearchError>) -> Self {
        match result {
            Ok(locations) => Self {
                error: None,
                result: Some(locations),
            },
            Err(e) => Self {
                error: Some(e.message()),
                result: None,
            },
        }
    }
}

/// Pending result of a dispatched search
#[derive(Debug)]
pub struct SearchHandle {
    id: Uuid,
    receiver: oneshot::Receiver<Result<Vec<FormattedLocation>, SearchError>>,
}

impl SearchHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the result from async code
    pub async fn wait(self) -> Result<Vec<FormattedLocation>, SearchError> {
        self.receiver
            .await
            .unwrap_or_else(|_| Err(SearchError::OracleFailure(TERMINATED.to_string())))
    }

    /// Wait for the result from a thread outside the runtime
    pub fn blocking_wait(self) -> Result<Vec<FormattedLocation>, SearchError> {
        self.receiver
            .blocking_recv()
            .unwrap_or_else(|_| Err(SearchError::OracleFailure(TERMINATED.to_string())))
    }
}

/// Submits searches to the runtime so the calling thread never waits on
/// the geocoder
#[derive(Clone)]
pub struct SearchDispatcher {
    orchestrator: Arc<SearchOrchestrator>,
    runtime: Handle,
}

impl SearchDispatcher {
    pub fn new(orchestrator: Arc<SearchOrchestrator>, runtime: Handle) -> Self {
        Self {
            orchestrator,
            runtime,
        }
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    /// Start a search and return a handle to its single result.
    ///
    /// Guard clauses run on the calling thread; a rejected search comes
    /// back as an already-resolved handle.
    pub fn dispatch(&self, text: impl Into<String>, region: BoundingRegion) -> SearchHandle {
        let id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();

        self.submit(id, SearchQuery::new(text, region), move |result| {
            if sender.send(result).is_err() {
                debug!("Search handle dropped before delivery");
            }
        });

        SearchHandle { id, receiver }
    }

    /// Start a search and invoke `callback` once with its outcome.
    ///
    /// Rejections by the guard clauses call back on the calling thread;
    /// everything else calls back from a runtime worker. A search task
    /// dropped before finishing calls back with a failure.
    pub fn dispatch_with_callback<F>(&self, text: impl Into<String>, region: BoundingRegion, callback: F)
    where
        F: FnOnce(SearchOutcome) + Send + 'static,
    {
        self.submit(Uuid::new_v4(), SearchQuery::new(text, region), move |result| {
            callback(SearchOutcome::from(result))
        });
    }

    fn submit<F>(&self, id: Uuid, query: SearchQuery, deliver: F)
    where
        F: FnOnce(Result<Vec<FormattedLocation>, SearchError>) + Send + 'static,
    {
        let delivery = Delivery::new(deliver);

        if let Err(e) = self.orchestrator.check_preconditions() {
            delivery.send(Err(e));
            return;
        }

        let orchestrator = self.orchestrator.clone();
        let span = info_span!("search", id = %id, text = %query.text);
        self.runtime.spawn(
            async move {
                let result = orchestrator.run(&query).await;
                delivery.send(result);
            }
            .instrument(span),
        );
    }
}

/// Hands a search result to its receiver exactly once.
///
/// Dropped unsent (task cancelled at shutdown, panic in an oracle), it
/// delivers a termination failure instead.
struct Delivery<F>
where
    F: FnOnce(Result<Vec<FormattedLocation>, SearchError>),
{
    deliver: Option<F>,
}

impl<F> Delivery<F>
where
    F: FnOnce(Result<Vec<FormattedLocation>, SearchError>),
{
    fn new(deliver: F) -> Self {
        Self {
            deliver: Some(deliver),
        }
    }

    fn send(mut self, result: Result<Vec<FormattedLocation>, SearchError>) {
        if let Some(deliver) = self.deliver.take() {
            deliver(result);
        }
    }
}

impl<F> Drop for Delivery<F>
where
    F: FnOnce(Result<Vec<FormattedLocation>, SearchError>),
{
    fn drop(&mut self) {
        if let Some(deliver) = self.deliver.take() {
            warn!("Search task dropped before delivering a result");
            deliver(Err(SearchError::OracleFailure(TERMINATED.to_string())));
        }
    }
}
