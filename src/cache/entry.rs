//! Cache Entry Module
//!
//! A handled identifier and the instant its dedup window started.

// == Cache Entry ==
/// One identifier recorded by the dedup cache.
///
/// Entries are never mutated after creation; `inserted_at` is fixed for the
/// entry's whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The opaque identifier (a product ASIN in practice)
    pub id: String,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with `now_ms`.
    pub fn new(id: impl Into<String>, now_ms: u64) -> Self {
        Self {
            id: id.into(),
            inserted_at: now_ms,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's window has elapsed at `now_ms`.
    ///
    /// Boundary condition: the entry is expired once
    /// `inserted_at + window_ms <= now_ms`, so a zero window expires the
    /// entry on the very next access. A clock that moved behind
    /// `inserted_at` reads as zero elapsed time.
    pub fn is_expired(&self, now_ms: u64, window_ms: u64) -> bool {
        now_ms.saturating_sub(self.inserted_at) >= window_ms
    }
}
