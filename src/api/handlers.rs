//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::DedupCache;
use crate::error::{MonitorError, Result};
use crate::models::{ClearResponse, ContainsResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the same dedup cache the monitor task uses. The cache locks
/// internally, so no outer lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DedupCache>,
}

impl AppState {
    /// Creates a new AppState sharing the given cache.
    pub fn new(cache: Arc<DedupCache>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with a fresh cache sized from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Arc::new(DedupCache::new(config.cache_window())))
    }
}

/// Handler for GET /contains/:id
///
/// Reports whether the id is cached and how long it stays suppressed.
pub async fn contains_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContainsResponse>> {
    if id.trim().is_empty() {
        return Err(MonitorError::InvalidRequest("Id cannot be empty".to_string()));
    }

    let expires_in = state.cache.remaining(&id).map(|left| left.as_secs());
    Ok(Json(ContainsResponse::new(id, expires_in)))
}

/// Handler for POST /clear
///
/// Operator reset: every id becomes eligible for posting again.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear();
    info!(cleared, "Dedup cache reset via admin API");
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the monitor.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
