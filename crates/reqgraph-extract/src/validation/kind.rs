use crate::graph::Graph;
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates that every node belongs to a recognized category
pub struct KindValidator;

impl Validator for KindValidator {
    fn validate(&self, graph: &Graph) -> Result<(), ValidationError> {
        match graph
            .nodes
            .iter()
            .enumerate()
            .find(|(_, node)| !node.kind.is_recognized())
        {
            Some((node_idx, node)) => Err(ValidationError {
                code: error_codes::UNRECOGNIZED_KIND,
                message: format!(
                    "Node '{}' has unrecognized type '{}'. \
                     Expected one of: 'requirement', 'constraint', 'implicit'",
                    node.id, node.kind
                ),
                path: Some(format!("nodes[{}].type", node_idx)),
            }),
            None => Ok(()),
        }
    }
}
