//! Flattening of the categorized YAML document into the canonical graph.

use crate::decode::RequirementDocument;
use crate::graph::{Graph, Link, Node, NodeKind};

/// Flatten a categorized document into a graph.
///
/// Nodes keep category order (requirements, constraints, implicit knowledge)
/// and entry order within a category. Every `related_to` entry becomes a link
/// from the owning entry, in declaration order. Unresolved relation targets are
/// kept; rejecting them is the validator's job.
pub fn normalize(document: RequirementDocument) -> Graph {
    let mut nodes = Vec::with_capacity(document.entry_count());
    let mut links = Vec::new();

    let RequirementDocument {
        requirements,
        constraints,
        implicit_knowledge,
    } = document;

    let categories = [
        (NodeKind::Requirement, requirements),
        (NodeKind::Constraint, constraints),
        (NodeKind::Implicit, implicit_knowledge),
    ];

    for (kind, entries) in categories {
        for entry in entries {
            links.extend(
                entry
                    .related_to
                    .into_iter()
                    .map(|relation| Link::new(entry.id.clone(), relation.id, relation.relation)),
            );
            nodes.push(Node::new(entry.id, kind.clone(), entry.text, entry.description));
        }
    }

    Graph::new(nodes, links)
}

impl From<RequirementDocument> for Graph {
    fn from(document: RequirementDocument) -> Self {
        normalize(document)
    }
}
