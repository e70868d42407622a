//! Deal Sources
//!
//! The producer side of the monitor loop.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::deals::Deal;
use crate::error::{MonitorError, Result};

// == Deal Source Trait ==
/// Yields the deals currently listed by the price tracker.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetches the current batch of deals. Records may be unnormalized.
    async fn fetch_deals(&self) -> Result<Vec<Deal>>;

    /// Resets the source after a failed fetch.
    async fn restart(&self) -> Result<()> {
        Ok(())
    }
}

// == JSON File Source ==
/// Reads a JSON array of deals from a file on every fetch.
///
/// The scraper that produces the file runs outside this process; a missing
/// file means it has not written anything yet and yields no deals.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DealSource for JsonFileSource {
    async fn fetch_deals(&self) -> Result<Vec<Deal>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Deals file not found, nothing to scan");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            debug!(path = %self.path.display(), "Deals file is empty");
            return Ok(Vec::new());
        }

        let deals: Vec<Deal> = serde_json::from_str(&raw).map_err(|err| {
            MonitorError::Source(format!(
                "malformed deals file {}: {}",
                self.path.display(),
                err
            ))
        })?;

        info!(count = deals.len(), path = %self.path.display(), "Loaded deals");
        Ok(deals)
    }
}
