use std::error::Error;
use std::fmt;

use crate::graph::Graph;

mod identity;
mod kind;
mod reference;

pub use identity::UniqueIdValidator;
pub use kind::KindValidator;
pub use reference::LinkReferenceValidator;

/// Represents a structural invariant violated by a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "links[2].target")
    pub path: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Two nodes share an id
    pub const DUPLICATE_ID: &str = "ERR_GRAPH_VALIDATION_DUPLICATE_ID";

    /// A link endpoint does not resolve to a declared node
    pub const DANGLING_REFERENCE: &str = "ERR_GRAPH_VALIDATION_DANGLING_REFERENCE";

    /// A node kind is not one of the recognized categories
    pub const UNRECOGNIZED_KIND: &str = "ERR_GRAPH_VALIDATION_UNRECOGNIZED_KIND";
}

/// A single structural check over a graph
pub trait Validator {
    /// Check the graph, reporting the first violation found
    fn validate(&self, graph: &Graph) -> Result<(), ValidationError>;
}

/// Run every check in order, stopping at the first failure.
///
/// Ids are checked before references so that a dangling-link report is never
/// caused by an ambiguous id, and references before kinds.
pub fn check_graph(graph: &Graph) -> Result<(), ValidationError> {
    let validators: [&dyn Validator; 3] = [
        &UniqueIdValidator,
        &LinkReferenceValidator,
        &KindValidator,
    ];

    for validator in validators {
        validator.validate(graph)?;
    }

    Ok(())
}

/// Gate a graph: returns it unchanged when every invariant holds.
pub fn validate_graph(graph: Graph) -> Result<Graph, ValidationError> {
    check_graph(&graph)?;
    Ok(graph)
}
