//! Shared Dedup Cache Module
//!
//! Thread-safe handle over [`DedupStore`]: one mutex, one clock read per call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheStats, Clock, DedupStore, SystemClock, DEFAULT_WINDOW_HOURS};

// == Dedup Cache ==
/// Sliding-window record of identifiers that have already been handled.
///
/// Every operation sweeps expired entries first, so there is no background
/// cleanup task. All access is serialized behind a single `Mutex`; the
/// critical section never awaits or does I/O. Share it across tasks with
/// `Arc<DedupCache>`.
#[derive(Debug)]
pub struct DedupCache {
    store: Mutex<DedupStore>,
    clock: Arc<dyn Clock>,
}

impl DedupCache {
    // == Constructor ==
    /// Creates a cache with the given window, reading time from the wall clock.
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, Arc::new(SystemClock))
    }

    /// Creates a cache with the given window and time source.
    pub fn with_clock(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(DedupStore::new(window)),
            clock,
        }
    }

    /// Creates a cache whose window is a whole number of hours.
    pub fn with_window_hours(hours: u64) -> Self {
        Self::new(Duration::from_secs(hours.saturating_mul(3600)))
    }

    // == Contains ==
    /// Returns true if `id` was inserted within the current window.
    pub fn contains(&self, id: &str) -> bool {
        let mut store = self.lock();
        store.contains(id, self.clock.now_ms())
    }

    // == Insert ==
    /// Marks `id` as handled, starting its window.
    ///
    /// Inserting an id that is still cached leaves its original window intact.
    pub fn insert(&self, id: &str) {
        let created = {
            let mut store = self.lock();
            store.insert(id, self.clock.now_ms())
        };

        if created {
            debug!(id, "Added id to dedup cache");
        }
    }

    // == Remaining Window ==
    /// Returns how long `id` stays suppressed, or `None` if it is not cached.
    pub fn remaining(&self, id: &str) -> Option<Duration> {
        let mut store = self.lock();
        store.remaining(id, self.clock.now_ms())
    }

    // == Clear ==
    /// Drops every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let removed = {
            let mut store = self.lock();
            store.clear(self.clock.now_ms())
        };
        info!(removed, "Dedup cache cleared");
        removed
    }

    // == Stats ==
    /// Returns live entry count, window and lifetime counters.
    pub fn stats(&self) -> CacheStats {
        let mut store = self.lock();
        store.stats(self.clock.now_ms())
    }

    /// Configured dedup window.
    pub fn window(&self) -> Duration {
        self.lock().window()
    }

    // Recovers the guard from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, DedupStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::with_window_hours(DEFAULT_WINDOW_HOURS)
    }
}
