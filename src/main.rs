//! geosearch-rs: HTTP bridge for region-biased location search
//!
//! This is the main entry point for the application.

use anyhow::Result;
use geosearch_rs::{
    config,
    context::SessionContext,
    network::HttpClient,
    oracle::OracleLoader,
    search::{SearchDispatcher, SearchOrchestrator},
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::load_settings()?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting geosearch-rs v{}", geosearch_rs::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;

    // Load oracle
    let oracle = OracleLoader::load(&settings, client)?;

    // Host session stays active until shutdown begins
    let context = Arc::new(SessionContext::active());

    let orchestrator = SearchOrchestrator::new(oracle, context.clone())
        .with_max_results(settings.search.max_results);
    let dispatcher = SearchDispatcher::new(Arc::new(orchestrator), Handle::current());

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let state = AppState::new(settings, dispatcher, context.clone());
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(context))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C and mark the host session inactive
async fn shutdown_signal(context: Arc<SessionContext>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, rejecting new searches");
    context.deactivate();
}
