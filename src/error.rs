//! Error types for the deal monitor
//!
//! Provides unified error handling using thiserror. Cache operations never
//! fail; these errors come from the producer, the notifier, configuration
//! and the admin API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Monitor Error Enum ==
/// Unified error type for the deal monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The deal producer could not deliver deals
    #[error("Source error: {0}")]
    Source(String),

    /// A notification could not be published
    #[error("Notify error: {0}")]
    Notify(String),

    /// Invalid admin API request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for MonitorError {
    fn into_response(self) -> Response {
        let status = match &self {
            MonitorError::InvalidRequest(_) | MonitorError::Config(_) => StatusCode::BAD_REQUEST,
            MonitorError::Source(_) | MonitorError::Notify(_) => StatusCode::BAD_GATEWAY,
            MonitorError::Io(_) | MonitorError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the deal monitor.
pub type Result<T> = std::result::Result<T, MonitorError>;
