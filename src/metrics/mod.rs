//! Metrics collection module
//!
//! Tracks search volume, failures by kind and latency for the HTTP bridge.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Number of latencies kept for the rolling average
const LATENCY_WINDOW: usize = 100;

/// Process-wide search metrics
pub struct Metrics {
    started_at: DateTime<Utc>,
    total_searches: AtomicU64,
    successful_searches: AtomicU64,
    /// Failures by error code
    failures: RwLock<HashMap<String, u64>>,
    /// Recent search latencies in ms
    response_times: RwLock<Vec<u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_searches: AtomicU64::new(0),
            successful_searches: AtomicU64::new(0),
            failures: RwLock::new(HashMap::new()),
            response_times: RwLock::new(Vec::new()),
        }
    }

    /// Record a successful search
    pub fn record_success(&self, time_ms: u64) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        self.successful_searches.fetch_add(1, Ordering::Relaxed);
        self.record_response_time(time_ms);
    }

    /// Record a failed search under its error code
    pub fn record_failure(&self, code: &str, time_ms: u64) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        {
            let mut failures = self.failures.write().unwrap();
            *failures.entry(code.to_string()).or_insert(0) += 1;
        }
        self.record_response_time(time_ms);
    }

    fn record_response_time(&self, time_ms: u64) {
        let mut times = self.response_times.write().unwrap();
        if times.len() >= LATENCY_WINDOW {
            times.remove(0);
        }
        times.push(time_ms);
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Average latency over the recent window
    pub fn get_avg_response_time(&self) -> Option<u64> {
        let times = self.response_times.read().unwrap();
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Snapshot for reporting
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            started_at: self.started_at,
            total_searches: self.get_total_searches(),
            successful_searches: self.successful_searches.load(Ordering::Relaxed),
            failures: self.failures.read().unwrap().clone(),
            avg_response_time_ms: self.get_avg_response_time(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub started_at: DateTime<Utc>,
    pub total_searches: u64,
    pub successful_searches: u64,
    pub failures: HashMap<String, u64>,
    pub avg_response_time_ms: Option<u64>,
}
