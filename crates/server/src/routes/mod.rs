//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the refind
//! server. Routes are organized by functionality:
//!
//! - `health`: Health check and metrics
//! - `auth`: Registration, login, and user listing
//! - `items`: Lost/found report submission and listing
//! - `matching`: Candidate pairings and the reunite operation (admin)

pub mod auth;
pub mod health;
pub mod items;
pub mod matching;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "refind Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/health",
            "/api/auth/register",
            "/api/auth/login",
            "/api/users",
            "/api/items/lost",
            "/api/items/found",
            "/api/items/matches",
            "/api/items/reunite",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
