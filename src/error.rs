//! Search error taxonomy

use thiserror::Error;

/// Terminal failures of a single search call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No active host session to run the search in
    #[error("No active host context")]
    ContextUnavailable,
    /// The geocoder is absent or disabled
    #[error("Geocoding oracle is not available")]
    OracleUnavailable,
    /// The oracle raised during the local or remote phase
    #[error("{0}")]
    OracleFailure(String),
}

impl SearchError {
    /// Stable code for bridge responses and metrics
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContextUnavailable => "context_unavailable",
            Self::OracleUnavailable => "oracle_unavailable",
            Self::OracleFailure(_) => "oracle_failure",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        Self::OracleFailure(err.to_string())
    }
}
