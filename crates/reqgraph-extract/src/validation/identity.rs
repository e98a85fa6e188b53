use std::collections::HashSet;

use crate::graph::Graph;
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates that node ids are unique within the graph
pub struct UniqueIdValidator;

impl Validator for UniqueIdValidator {
    fn validate(&self, graph: &Graph) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(graph.nodes.len());

        for (node_idx, node) in graph.nodes.iter().enumerate() {
            if !seen.insert(node.id.as_str()) {
                return Err(ValidationError {
                    code: error_codes::DUPLICATE_ID,
                    message: format!(
                        "Duplicate node id '{}' - node ids must be unique within a graph",
                        node.id
                    ),
                    path: Some(format!("nodes[{}].id", node_idx)),
                });
            }
        }

        Ok(())
    }
}
