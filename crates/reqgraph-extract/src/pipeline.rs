//! Extraction orchestration.
//!
//! Every run moves through
//! `Start -> Scanned -> Decoded -> (Normalized) -> Validated -> Done`. The JSON
//! track skips normalization. The first failing stage ends the run with its
//! error; no partial graph is ever produced.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::decode::{decode_json_graph, decode_yaml_document, DecodeStrategy, RequirementDocument};
use crate::error::ExtractError;
use crate::generator::TextGenerator;
use crate::graph::Graph;
use crate::normalize::normalize;
use crate::prompt;
use crate::scanner;
use crate::validation::validate_graph;

/// Stage reached by a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Scanned,
    Decoded,
    Normalized,
    Validated,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::Scanned => "scanned",
            PipelineStage::Decoded => "decoded",
            PipelineStage::Normalized => "normalized",
            PipelineStage::Validated => "validated",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of the chained YAML extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YamlExtraction {
    /// The intermediate YAML document, as recovered from the model output
    pub yaml: String,
    /// The graph built from it
    pub graph: Graph,
}

/// Run the pipeline over raw model output.
pub fn graph_from_response(raw: &str, strategy: DecodeStrategy) -> Result<Graph, ExtractError> {
    let block = scanner::scan(raw, strategy)?;
    debug!(
        stage = %PipelineStage::Scanned,
        %strategy,
        origin = ?block.origin,
        len = block.content.len(),
        "Located structured block"
    );

    match strategy {
        DecodeStrategy::Json => {
            let graph = decode_json_graph(block.content)?;
            debug!(
                stage = %PipelineStage::Decoded,
                nodes = graph.nodes.len(),
                links = graph.links.len(),
                "Decoded JSON graph"
            );
            finish(graph)
        }
        DecodeStrategy::Yaml => graph_from_yaml(block.content),
    }
}

/// Build a graph from a YAML document without scanning or calling the model.
///
/// The whole input is treated as the document, so a client can edit and
/// resubmit the intermediate form returned by the YAML extraction.
pub fn graph_from_yaml(yaml: &str) -> Result<Graph, ExtractError> {
    let document = decode_yaml_document(yaml)?;
    debug!(
        stage = %PipelineStage::Decoded,
        entries = document.entry_count(),
        "Decoded YAML document"
    );
    graph_from_document(document)
}

fn graph_from_document(document: RequirementDocument) -> Result<Graph, ExtractError> {
    let graph = normalize(document);
    debug!(
        stage = %PipelineStage::Normalized,
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "Normalized document"
    );
    finish(graph)
}

fn finish(graph: Graph) -> Result<Graph, ExtractError> {
    let graph = validate_graph(graph).map_err(|err| {
        warn!(code = err.code, path = ?err.path, "Graph rejected: {}", err.message);
        err
    })?;
    debug!(stage = %PipelineStage::Validated, "Graph passed validation");
    Ok(graph)
}

/// Model-backed extractor.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Extractor {
    generator: Arc<dyn TextGenerator>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

impl Extractor {
    /// Create a new extractor over a text generator
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Extract a graph through the JSON track.
    #[instrument(skip_all, fields(input_len = text.len()))]
    pub async fn extract(&self, text: &str) -> Result<Graph, ExtractError> {
        let response = self.generate(&prompt::json_graph_prompt(text)).await?;
        let graph = graph_from_response(&response, DecodeStrategy::Json)?;
        debug!(
            stage = %PipelineStage::Done,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "Extraction complete"
        );
        Ok(graph)
    }

    /// Extract only the intermediate YAML document.
    ///
    /// The returned text has been checked to decode as a categorized document,
    /// but its relations are not validated.
    #[instrument(skip_all, fields(input_len = text.len()))]
    pub async fn extract_yaml_intermediate(&self, text: &str) -> Result<String, ExtractError> {
        let (yaml, _) = self.yaml_emission(text).await?;
        Ok(yaml)
    }

    /// Extract the YAML document and the graph built from it.
    #[instrument(skip_all, fields(input_len = text.len()))]
    pub async fn extract_with_yaml(&self, text: &str) -> Result<YamlExtraction, ExtractError> {
        let (yaml, document) = self.yaml_emission(text).await?;
        let graph = graph_from_document(document)?;
        debug!(
            stage = %PipelineStage::Done,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "Extraction complete"
        );
        Ok(YamlExtraction { yaml, graph })
    }

    async fn yaml_emission(
        &self,
        text: &str,
    ) -> Result<(String, RequirementDocument), ExtractError> {
        let response = self.generate(&prompt::yaml_document_prompt(text)).await?;
        let block = scanner::scan(&response, DecodeStrategy::Yaml)?;
        debug!(
            stage = %PipelineStage::Scanned,
            origin = ?block.origin,
            len = block.content.len(),
            "Located YAML block"
        );

        let document = decode_yaml_document(block.content)?;
        debug!(
            stage = %PipelineStage::Decoded,
            entries = document.entry_count(),
            "Decoded YAML document"
        );

        Ok((block.content.to_string(), document))
    }

    async fn generate(&self, prompt: &str) -> Result<String, ExtractError> {
        debug!(stage = %PipelineStage::Start, prompt_len = prompt.len(), "Requesting model output");
        let response = self.generator.generate(prompt).await.map_err(|err| {
            warn!("Model call failed: {}", err);
            ExtractError::from(err)
        })?;

        if response.trim().is_empty() {
            warn!("Model returned an empty response");
            return Err(ExtractError::ModelUnavailable(
                "model returned an empty response".to_string(),
            ));
        }

        debug!(response = %response, "Raw model response");
        Ok(response)
    }
}
