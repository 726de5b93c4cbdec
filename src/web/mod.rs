//! Web server module
//!
//! HTTP bridge exposing location search to hosts that speak JSON.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
