//! User agent generation
//!
//! Public geocoders ask clients to identify the application, so the agent
//! is stable rather than randomized.

/// `geosearch-rs/<version>`, optionally followed by a deployment suffix
pub fn default_user_agent(suffix: Option<&str>) -> String {
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("geosearch-rs/{} {}", crate::VERSION, suffix),
        None => format!("geosearch-rs/{}", crate::VERSION),
    }
}
