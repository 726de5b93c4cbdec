//! Search orchestration module
//!
//! Runs the local-then-remote geocoding pipeline and dispatches it off the
//! caller's thread.

mod dispatch;
mod executor;
mod models;

pub use dispatch::{SearchDispatcher, SearchHandle, SearchOutcome};
pub use executor::SearchOrchestrator;
pub use models::*;
