//! Result types and merge helpers
//!
//! Addresses come from an oracle; formatted locations are what callers see.

mod merge;
mod types;

pub use merge::{dedup_against, merge_phases};
pub use types::*;
