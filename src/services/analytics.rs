//! Request counting and the analytics snapshot.

use crate::{
    models::AnalyticsSnapshot,
    services::location_tracker::LocationTracker,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

/// Number of locations included in an analytics snapshot
pub const POPULAR_LOCATIONS_LIMIT: usize = 10;

/// Process-wide count of weather requests
#[derive(Debug, Default)]
pub struct RequestCounter {
    total: AtomicU64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request and return the new total
    pub fn increment(&self) -> u64 {
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

/// Read-only view over the request counter and location rankings
#[derive(Debug, Clone)]
pub struct AnalyticsReporter {
    requests: Arc<RequestCounter>,
    tracker: Arc<LocationTracker>,
    started_at: Instant,
}

impl AnalyticsReporter {
    pub fn new(requests: Arc<RequestCounter>, tracker: Arc<LocationTracker>) -> Self {
        Self {
            requests,
            tracker,
            started_at: Instant::now(),
        }
    }

    /// Total requests plus the top locations by request count
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_requests: self.requests.get(),
            popular_locations: self.tracker.top_n(POPULAR_LOCATIONS_LIMIT),
        }
    }

    pub fn total_requests(&self) -> u64 {
        self.requests.get()
    }

    /// Number of distinct locations tracked so far
    pub fn tracked_locations(&self) -> usize {
        self.tracker.len()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
