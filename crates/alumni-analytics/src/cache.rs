//! Short-lived cache of fetched pages

use crate::request::FetchRequest;
use indexmap::IndexMap;
use std::time::Duration;
use tokio::time::Instant;

/// Pages keyed by the request that produced them
///
/// Entries older than the TTL are treated as missing. When full, the oldest
/// insertion is evicted first.
#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: IndexMap<FetchRequest, (Instant, T)>,
    ttl: Duration,
    capacity: usize,
}

impl<T: Clone> ResponseCache<T> {
    /// Create a cache; a zero capacity or TTL disables caching
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            ttl,
            capacity,
        }
    }

    /// Whether anything can ever be cached
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0 && !self.ttl.is_zero()
    }

    /// Fresh entry for `request`
    #[must_use]
    pub fn get(&self, request: &FetchRequest) -> Option<T> {
        self.entries
            .get(request)
            .filter(|(stored, _)| stored.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    /// Store `value` for `request`
    pub fn insert(&mut self, request: FetchRequest, value: T) {
        if !self.is_enabled() {
            return;
        }
        self.entries.shift_remove(&request);
        self.entries.insert(request, (Instant::now(), value));
        while self.entries.len() > self.capacity {
            self.entries.shift_remove_index(0);
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stored entries, fresh or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
