//! Cache Statistics Module
//!
//! Snapshot of the dedup cache: live entry count, configured window and
//! lifetime counters.

use std::time::Duration;

// == Cache Stats ==
/// Point-in-time view of the dedup cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Number of entries still inside their window
    pub total_entries: usize,
    /// Configured dedup window
    pub window: Duration,
    /// `contains` calls that found the identifier
    pub hits: u64,
    /// `contains` calls that did not
    pub misses: u64,
    /// Inserts that created a new entry
    pub inserts: u64,
    /// Entries purged because their window elapsed
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed stats for a cache with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the share of lookups that were already cached.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Window length in (possibly fractional) hours.
    pub fn window_hours(&self) -> f64 {
        self.window.as_secs_f64() / 3600.0
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }
}
