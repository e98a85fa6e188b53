//! API module for the requirement graph server
//!
//! This module contains the API routes and handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod health;
pub mod requirements;

use crate::server::RequirementServer;

/// Build the router for API endpoints
pub fn build_router(server: Arc<RequirementServer>) -> Router {
    Router::new()
        // Extraction
        .route("/api/requirements/extract", post(requirements::extract_graph))
        .route("/api/requirements/extract_yaml", post(requirements::extract_yaml))
        .route("/api/requirements/yaml_to_graph", post(requirements::yaml_to_graph))
        .route(
            "/api/requirements/extract_with_yaml",
            post(requirements::extract_with_yaml),
        )
        // Health check
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        // Shared state
        .with_state(server)
}
