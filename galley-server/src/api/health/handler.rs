//! Health check handler

use axum::Json;
use serde::Serialize;
use shared::message::CLIENT_POLL_INTERVAL_SECS;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Terminals poll the queue at this interval to reconcile missed events
    pub poll_interval_secs: u64,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        poll_interval_secs: CLIENT_POLL_INTERVAL_SECS,
    })
}
