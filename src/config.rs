//! Configuration Module
//!
//! Handles loading and managing monitor configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_WINDOW_HOURS, MAX_WINDOW_HOURS};
use crate::error::{MonitorError, Result};

/// Monitor configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dedup window in hours
    pub cache_duration_hours: u64,
    /// Seconds between scan cycles
    pub scan_interval: u64,
    /// Minimum discount (percent) for a deal to be posted
    pub min_discount: f64,
    /// Seconds to wait after each successful post
    pub post_delay: u64,
    /// Seconds to wait after a failed cycle before retrying
    pub retry_delay: u64,
    /// Seconds to wait before the first cycle
    pub startup_delay: u64,
    /// JSON file written by the external scraper
    pub deals_file: PathBuf,
    /// Admin HTTP port
    pub admin_port: u16,
    /// Verbose logging
    pub debug: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DURATION_HOURS` - Dedup window in hours (default: 24)
    /// - `SCRAPER_INTERVAL` - Seconds between scans (default: 300)
    /// - `MIN_DISCOUNT_PERCENT` - Minimum discount to post (default: 40)
    /// - `POST_DELAY_SECS` - Pause after each post (default: 2)
    /// - `RETRY_DELAY_SECS` - Pause after a failed cycle (default: 30)
    /// - `STARTUP_DELAY_SECS` - Pause before the first scan (default: 10)
    /// - `DEALS_FILE` - Deals feed path (default: deals.json)
    /// - `ADMIN_PORT` - Admin HTTP port (default: 3000)
    /// - `DEBUG` - `true` enables debug logging (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str, default: u64| parse_or(&lookup, key, default);

        Self {
            cache_duration_hours: parsed("CACHE_DURATION_HOURS", defaults.cache_duration_hours),
            scan_interval: parsed("SCRAPER_INTERVAL", defaults.scan_interval),
            min_discount: parse_or(&lookup, "MIN_DISCOUNT_PERCENT", defaults.min_discount),
            post_delay: parsed("POST_DELAY_SECS", defaults.post_delay),
            retry_delay: parsed("RETRY_DELAY_SECS", defaults.retry_delay),
            startup_delay: parsed("STARTUP_DELAY_SECS", defaults.startup_delay),
            deals_file: lookup("DEALS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.deals_file),
            admin_port: parse_or(&lookup, "ADMIN_PORT", defaults.admin_port),
            debug: lookup("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.debug),
        }
    }

    /// Rejects values the monitor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.min_discount) {
            return Err(MonitorError::Config(format!(
                "MIN_DISCOUNT_PERCENT must be between 0 and 100, got {}",
                self.min_discount
            )));
        }
        if self.cache_duration_hours > MAX_WINDOW_HOURS {
            return Err(MonitorError::Config(format!(
                "CACHE_DURATION_HOURS must be at most {}, got {}",
                MAX_WINDOW_HOURS, self.cache_duration_hours
            )));
        }
        if self.scan_interval == 0 {
            return Err(MonitorError::Config(
                "SCRAPER_INTERVAL must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Dedup window as a Duration.
    pub fn cache_window(&self) -> Duration {
        Duration::from_secs(self.cache_duration_hours.saturating_mul(3600))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_duration_hours: DEFAULT_WINDOW_HOURS,
            scan_interval: 300,
            min_discount: 40.0,
            post_delay: 2,
            retry_delay: 30,
            startup_delay: 10,
            deals_file: PathBuf::from("deals.json"),
            admin_port: 3000,
            debug: false,
        }
    }
}
