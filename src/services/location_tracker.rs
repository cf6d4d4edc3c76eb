//! In-memory popularity tracking for requested locations.

use crate::models::{CoordinateQuery, LocationCount};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

#[derive(Debug)]
struct Counter {
    count: u64,
    /// Position at which the key was first recorded, used to order ties
    first_seen: u64,
}

#[derive(Debug, Default)]
struct Counters {
    by_key: HashMap<String, Counter>,
    next_seq: u64,
}

/// Frequency counter keyed by rounded coordinate pairs
///
/// Counters live for the process lifetime. All access goes through a single
/// mutex, so concurrent `record` calls never lose updates.
#[derive(Debug, Default)]
pub struct LocationTracker {
    counters: Mutex<Counters>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request for the query's location bucket
    pub fn record(&self, query: &CoordinateQuery) {
        let key = query.location_key();
        let mut guard = self.lock();
        let Counters { by_key, next_seq } = &mut *guard;

        by_key
            .entry(key)
            .and_modify(|counter| counter.count += 1)
            .or_insert_with(|| {
                let counter = Counter {
                    count: 1,
                    first_seen: *next_seq,
                };
                *next_seq += 1;
                counter
            });
    }

    /// The `n` most requested locations, highest count first.
    ///
    /// Equal counts keep the order in which the locations were first seen.
    pub fn top_n(&self, n: usize) -> Vec<LocationCount> {
        let counters = self.lock();

        let mut entries: Vec<(&String, &Counter)> = counters.by_key.iter().collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });

        entries
            .into_iter()
            .take(n)
            .map(|(location, counter)| LocationCount {
                location: location.clone(),
                count: counter.count,
            })
            .collect()
    }

    /// Number of distinct location buckets seen so far
    pub fn len(&self) -> usize {
        self.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        // The counters stay consistent even if a holder panicked
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
