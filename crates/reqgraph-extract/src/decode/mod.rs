//! Format decoders for scanned blocks.
//!
//! Both decoders are strict about shape: anything they do not recognize is a
//! [`DecodeError`](crate::DecodeError) rather than a silently dropped field.

use std::fmt;

mod json;
mod yaml;

pub use json::decode_json_graph;
pub use yaml::{decode_yaml_document, DocumentEntry, Relation, RequirementDocument, CATEGORY_KEYS};

/// Which structured format the model was asked to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
    /// A flat `{nodes, links}` JSON object
    Json,
    /// A categorized YAML document with `related_to` relations
    Yaml,
}

impl fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStrategy::Json => f.write_str("JSON"),
            DecodeStrategy::Yaml => f.write_str("YAML"),
        }
    }
}
