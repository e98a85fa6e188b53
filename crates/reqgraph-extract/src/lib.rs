//! # reqgraph-extract
//!
//! Recovers a requirement graph from the text a language model produced when
//! asked to analyse free-form requirements.
//!
//! The model is treated as an unreliable text producer: its output may wrap the
//! structured block in commentary, omit code fences, or emit a block that does
//! not parse. This crate finds the block, decodes it, and only hands back a
//! graph once it satisfies the structural invariants a visualizer relies on:
//!
//! * node ids are unique
//! * every link endpoint names a declared node
//! * every node is a `requirement`, `constraint` or `implicit`
//!
//! ## Features
//!
//! * Text scanning for fenced and unfenced JSON and YAML blocks
//! * A direct JSON track and a categorized YAML track converging on one graph
//! * Fail-fast, typed errors naming the offending field or id
//! * A [`TextGenerator`] seam so the model can be replaced by a stub in tests
//!
//! ## Example
//!
//! ```
//! use reqgraph_extract::{graph_from_response, DecodeStrategy};
//!
//! let response = r#"Here is the analysis:
//! {"nodes": [{"id": "R1", "type": "requirement", "text": "Respond within 1s"},
//!            {"id": "C1", "type": "constraint", "text": "Use existing auth"}],
//!  "links": [{"source": "C1", "target": "R1", "label": "constrains"}]}
//! "#;
//!
//! let graph = graph_from_response(response, DecodeStrategy::Json).unwrap();
//! assert_eq!(graph.nodes.len(), 2);
//! assert_eq!(graph.links.len(), 1);
//! ```

mod error;
mod normalize;

pub mod decode;
pub mod generator;
pub mod graph;
pub mod pipeline;
pub mod prompt;
pub mod scanner;
pub mod validation;

pub use decode::{DecodeStrategy, DocumentEntry, Relation, RequirementDocument};
pub use error::{DecodeError, ErrorKind, ExtractError};
pub use generator::{ModelUnavailable, TextGenerator};
pub use graph::{Graph, Link, Node, NodeId, NodeKind};
pub use normalize::normalize;
pub use pipeline::{graph_from_response, graph_from_yaml, Extractor, PipelineStage, YamlExtraction};
pub use scanner::{BlockOrigin, ScannedBlock};
pub use validation::{validate_graph, ValidationError};

/// Returns a version string for the extraction crate
///
/// # Examples
///
/// ```
/// use reqgraph_extract::version;
///
/// let ver = version();
/// assert!(ver.starts_with("0."));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
