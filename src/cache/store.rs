//! Dedup Store Module
//!
//! Single-threaded sliding-window set. Callers pass the current time in;
//! [`DedupCache`](super::DedupCache) adds the lock and the clock.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == Dedup Store ==
/// Insertion-ordered queue of entries paired with an id index.
///
/// `order` only ever grows at the back, so it is sorted by `inserted_at`
/// and expiry can stop at the first live entry. An id is in `index` iff its
/// entry is in `order`; `index` maps the id to its `inserted_at`.
#[derive(Debug)]
pub struct DedupStore {
    /// Entries oldest-first
    order: VecDeque<CacheEntry>,
    /// Live ids and their insertion timestamps
    index: HashMap<String, u64>,
    /// Window length in milliseconds
    window_ms: u64,
    /// Lifetime counters
    stats: CacheStats,
}

impl DedupStore {
    // == Constructor ==
    /// Creates an empty store with the given dedup window.
    pub fn new(window: Duration) -> Self {
        Self {
            order: VecDeque::new(),
            index: HashMap::new(),
            window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
            stats: CacheStats::new(window),
        }
    }

    // == Evict Expired ==
    /// Pops expired entries off the front of the queue.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self, now_ms: u64) -> usize {
        let mut removed = 0;

        while let Some(front) = self.order.front() {
            if !front.is_expired(now_ms, self.window_ms) {
                break;
            }
            if let Some(entry) = self.order.pop_front() {
                self.index.remove(&entry.id);
                debug!(id = %entry.id, "Evicted expired id from dedup cache");
                removed += 1;
            }
        }

        self.stats.record_evictions(removed);
        debug_assert_eq!(self.order.len(), self.index.len(), "order and index out of sync");
        removed
    }

    // == Contains ==
    /// Evicts expired entries, then reports whether `id` is still inside its window.
    pub fn contains(&mut self, id: &str, now_ms: u64) -> bool {
        self.evict_expired(now_ms);

        let found = self.index.contains_key(id);
        if found {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        found
    }

    // == Insert ==
    /// Evicts expired entries, then records `id` as handled at `now_ms`.
    ///
    /// An id that is already present keeps its original timestamp.
    /// Returns true when a new entry was created.
    pub fn insert(&mut self, id: &str, now_ms: u64) -> bool {
        self.evict_expired(now_ms);

        if self.index.contains_key(id) {
            return false;
        }

        self.order.push_back(CacheEntry::new(id, now_ms));
        self.index.insert(id.to_string(), now_ms);
        self.stats.record_insert();
        true
    }

    // == Remaining Window ==
    /// Evicts expired entries, then returns how long `id` stays suppressed.
    ///
    /// Returns `None` if the id is not cached.
    pub fn remaining(&mut self, id: &str, now_ms: u64) -> Option<Duration> {
        self.evict_expired(now_ms);

        self.index.get(id).map(|&inserted_at| {
            let expires_at = inserted_at.saturating_add(self.window_ms);
            Duration::from_millis(expires_at.saturating_sub(now_ms))
        })
    }

    // == Clear ==
    /// Removes every entry. Lifetime counters are kept.
    ///
    /// Expired entries are swept first, so the returned count is the number
    /// of live entries dropped and matches what `stats` reported.
    pub fn clear(&mut self, now_ms: u64) -> usize {
        self.evict_expired(now_ms);

        let count = self.order.len();
        self.order.clear();
        self.index.clear();
        count
    }

    // == Stats ==
    /// Evicts expired entries, then returns a statistics snapshot.
    pub fn stats(&mut self, now_ms: u64) -> CacheStats {
        self.evict_expired(now_ms);

        let mut stats = self.stats.clone();
        stats.total_entries = self.order.len();
        stats
    }

    /// Configured dedup window.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    // == Length ==
    /// Returns the number of stored entries, including any not yet swept.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
