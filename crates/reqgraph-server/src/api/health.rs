//! Health check endpoint for the requirement graph server

use axum::{response::IntoResponse, Json};
use serde_json::json;
use tracing::debug;

/// Health check handler
///
/// Reports liveness only; the model endpoint is not probed.
pub async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");

    Json(json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
