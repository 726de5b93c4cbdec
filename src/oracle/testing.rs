//! Scripted oracle for unit tests

use super::traits::GeocodingOracle;
use crate::results::Address;
use crate::search::BoundingBox;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned reply for one phase
#[derive(Debug, Clone)]
pub enum Reply {
    List(Vec<Address>),
    NoList,
    Fail(String),
}

impl Reply {
    fn into_result(self) -> anyhow::Result<Option<Vec<Address>>> {
        match self {
            Reply::List(addresses) => Ok(Some(addresses)),
            Reply::NoList => Ok(None),
            Reply::Fail(message) => Err(anyhow::anyhow!(message)),
        }
    }
}

/// Oracle that replays fixed replies and counts calls
pub struct RecordingOracle {
    local: Reply,
    remote: Reply,
    available: bool,
    pub biased_calls: AtomicUsize,
    pub unbiased_calls: AtomicUsize,
    pub availability_calls: AtomicUsize,
    pub last_bbox: Mutex<Option<BoundingBox>>,
    /// `max_results` of each call, in call order, tagged by phase
    pub requested: Mutex<Vec<(&'static str, usize)>>,
}

impl RecordingOracle {
    pub fn new(local: Reply, remote: Reply) -> Self {
        Self {
            local,
            remote,
            available: true,
            biased_calls: AtomicUsize::new(0),
            unbiased_calls: AtomicUsize::new(0),
            availability_calls: AtomicUsize::new(0),
            last_bbox: Mutex::new(None),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn biased(&self) -> usize {
        self.biased_calls.load(Ordering::SeqCst)
    }

    pub fn unbiased(&self) -> usize {
        self.unbiased_calls.load(Ordering::SeqCst)
    }

    pub fn availability_checks(&self) -> usize {
        self.availability_calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<(&'static str, usize)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodingOracle for RecordingOracle {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_available(&self) -> bool {
        self.availability_calls.fetch_add(1, Ordering::SeqCst);
        self.available
    }

    async fn query_biased(
        &self,
        _text: &str,
        max_results: usize,
        bbox: &BoundingBox,
    ) -> anyhow::Result<Option<Vec<Address>>> {
        self.biased_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(("biased", max_results));
        *self.last_bbox.lock().unwrap() = Some(*bbox);
        self.local.clone().into_result()
    }

    async fn query_unbiased(
        &self,
        _text: &str,
        max_results: usize,
    ) -> anyhow::Result<Option<Vec<Address>>> {
        self.unbiased_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(("unbiased", max_results));
        self.remote.clone().into_result()
    }
}

/// `count` addresses named `{prefix}{i}` at distinct coordinates from `base`
pub fn places(prefix: &str, base: f64, count: usize) -> Vec<Address> {
    (0..count)
        .map(|i| {
            Address::new(format!("{prefix}{i}"), base + i as f64, base - i as f64)
                .with_line(format!("{i} {prefix} Street"))
        })
        .collect()
}
