use std::collections::HashSet;

use crate::graph::{Graph, Link};
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates that every link endpoint resolves to a declared node
pub struct LinkReferenceValidator;

impl LinkReferenceValidator {
    fn dangling(
        link: &Link,
        link_idx: usize,
        endpoint: &'static str,
        id: &str,
        node_ids: &HashSet<&str>,
    ) -> ValidationError {
        let mut available: Vec<_> = node_ids.iter().map(|id| format!("'{}'", id)).collect();
        available.sort();

        ValidationError {
            code: error_codes::DANGLING_REFERENCE,
            message: format!(
                "Link '{}' has a dangling {} reference to unknown node '{}'. Available nodes: {}",
                link,
                endpoint,
                id,
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            ),
            path: Some(format!("links[{}].{}", link_idx, endpoint)),
        }
    }
}

impl Validator for LinkReferenceValidator {
    fn validate(&self, graph: &Graph) -> Result<(), ValidationError> {
        let node_ids = graph.node_ids();

        for (link_idx, link) in graph.links.iter().enumerate() {
            if !node_ids.contains(link.source.as_str()) {
                return Err(Self::dangling(link, link_idx, "source", &link.source, &node_ids));
            }
            if !node_ids.contains(link.target.as_str()) {
                return Err(Self::dangling(link, link_idx, "target", &link.target, &node_ids));
            }
        }

        Ok(())
    }
}
