//! HTTP networking module
//!
//! Provides HTTP client functionality for network-backed oracles.

mod client;
mod request;
mod user_agent;

pub use client::HttpClient;
pub use request::{OracleRequest, OracleResponse};
pub use user_agent::default_user_agent;
