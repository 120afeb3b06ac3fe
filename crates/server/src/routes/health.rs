use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "OK",
        "message": "Server is running",
        "service": "refind-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime,
    }))
}

/// Prometheus metrics endpoint
///
/// Renders the installed recorder when the server was started with metrics
/// enabled; otherwise falls back to a minimal uptime gauge so the endpoint
/// stays scrapeable.
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let body = match &state.metrics {
        Some(handle) => handle.render(),
        None => format!(
            "# TYPE refind_uptime_seconds gauge\nrefind_uptime_seconds {uptime}\n"
        ),
    };

    Ok(body)
}
