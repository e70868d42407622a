//! Cache Module
//!
//! Sliding-window deduplication cache with lazy, eviction-on-access expiry.

mod clock;
mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use shared::DedupCache;
pub use stats::CacheStats;
pub use store::DedupStore;

// == Public Constants ==
/// Default dedup window in hours
pub const DEFAULT_WINDOW_HOURS: u64 = 24;

/// Longest accepted dedup window in hours (ten years)
pub const MAX_WINDOW_HOURS: u64 = 87_600;
