//! Requirement extraction handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use reqgraph_extract::{graph_from_yaml, Graph, YamlExtraction};

use super::errors::ApiError;
use crate::server::RequirementServer;

/// Free-form requirement text
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// A YAML document in the categorized layout
#[derive(Debug, Deserialize, Serialize)]
pub struct YamlDocument {
    pub yaml: String,
}

fn require_non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("'{}' must not be empty", field)));
    }
    Ok(value)
}

/// Extract a graph through the JSON track
pub async fn extract_graph(
    State(server): State<Arc<RequirementServer>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Graph>, ApiError> {
    let text = require_non_blank(&request.text, "text")?;
    let graph = server.extractor().extract(text).await?;
    info!(nodes = graph.nodes.len(), links = graph.links.len(), "Extracted requirement graph");
    Ok(Json(graph))
}

/// Extract the intermediate YAML document only
pub async fn extract_yaml(
    State(server): State<Arc<RequirementServer>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<YamlDocument>, ApiError> {
    let text = require_non_blank(&request.text, "text")?;
    let yaml = server.extractor().extract_yaml_intermediate(text).await?;
    info!(len = yaml.len(), "Extracted requirement document");
    Ok(Json(YamlDocument { yaml }))
}

/// Build a graph from a client-supplied YAML document
pub async fn yaml_to_graph(Json(request): Json<YamlDocument>) -> Result<Json<Graph>, ApiError> {
    let yaml = require_non_blank(&request.yaml, "yaml")?;
    let graph = graph_from_yaml(yaml)?;
    info!(nodes = graph.nodes.len(), links = graph.links.len(), "Converted document to graph");
    Ok(Json(graph))
}

/// Extract the YAML document together with its graph
pub async fn extract_with_yaml(
    State(server): State<Arc<RequirementServer>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<YamlExtraction>, ApiError> {
    let text = require_non_blank(&request.text, "text")?;
    let extraction = server.extractor().extract_with_yaml(text).await?;
    info!(
        nodes = extraction.graph.nodes.len(),
        links = extraction.graph.links.len(),
        "Extracted requirement document and graph"
    );
    Ok(Json(extraction))
}
