//! Application state shared across handlers

use crate::config::Settings;
use crate::context::SessionContext;
use crate::metrics::Metrics;
use crate::search::SearchDispatcher;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search dispatcher
    pub dispatcher: SearchDispatcher,
    /// Host session flag
    pub context: Arc<SessionContext>,
    /// Search metrics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, dispatcher: SearchDispatcher, context: Arc<SessionContext>) -> Self {
        Self {
            settings: Arc::new(settings),
            dispatcher,
            context,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
