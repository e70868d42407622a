//! API Module
//!
//! Admin HTTP endpoints for inspecting and resetting the dedup cache.
//!
//! # Endpoints
//! - `GET /contains/:id` - Check whether an id is inside its dedup window
//! - `POST /clear` - Drop every cached id
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
