//! Deal Watch - posts discounted products once per dedup window
//!
//! Polls a price-tracking feed, suppresses deals already posted within the
//! configured window and publishes the rest.

pub mod api;
pub mod cache;
pub mod config;
pub mod deals;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::DedupCache;
pub use config::Config;
pub use tasks::{spawn_monitor_task, Monitor, MonitorSettings};
