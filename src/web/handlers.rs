//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::metrics::MetricsSnapshot;
use crate::search::{BoundingRegion, SearchOutcome};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Query parameters for GET /search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search text
    #[serde(default)]
    pub q: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "latitudeDelta")]
    pub latitude_delta: f64,
    #[serde(rename = "longitudeDelta")]
    pub longitude_delta: f64,
}

/// JSON body for POST /search
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub text: String,
    pub region: BoundingRegion,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub instance_name: String,
    pub oracle: String,
    pub max_results: usize,
    pub metrics: MetricsSnapshot,
}

/// Search handler (query string)
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let region = BoundingRegion::new(
        params.latitude,
        params.longitude,
        params.latitude_delta,
        params.longitude_delta,
    );
    run_search(&state, params.q, region).await
}

/// Search handler (JSON body)
pub async fn search_json(State(state): State<AppState>, Json(body): Json<SearchBody>) -> Response {
    run_search(&state, body.text, body.region).await
}

async fn run_search(state: &AppState, text: String, region: BoundingRegion) -> Response {
    let start = Instant::now();
    let result = state.dispatcher.dispatch(text, region).wait().await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let status = match &result {
        Ok(_) => {
            state.metrics.record_success(elapsed_ms);
            StatusCode::OK
        }
        Err(e) => {
            state.metrics.record_failure(e.code(), elapsed_ms);
            status_for(e)
        }
    };

    (status, Json(SearchOutcome::from(result))).into_response()
}

fn status_for(error: &SearchError) -> StatusCode {
    match error {
        SearchError::ContextUnavailable | SearchError::OracleUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        SearchError::OracleFailure(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "instance_name": state.instance_name(),
    }))
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let orchestrator = state.dispatcher.orchestrator();
    Json(StatsResponse {
        instance_name: state.instance_name().to_string(),
        oracle: orchestrator.oracle_name().to_string(),
        max_results: orchestrator.max_results(),
        metrics: state.metrics.snapshot(),
    })
}
