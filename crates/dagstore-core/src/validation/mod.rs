use std::error::Error;
use std::fmt;

use crate::domain::graph::NewGraph;
use crate::error::CoreError;

mod name;
mod structure;

pub use name::{check_name, is_valid_name, MAX_NAME_LENGTH};
pub use structure::{validate_edges, validate_nodes, validate_structure};

/// Represents a validation error found in a submitted graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the offending element (e.g., "nodes[3]" or "edges[0].target")
    pub path: Option<String>,
}

impl ValidationError {
    /// Create a validation error
    pub fn new(code: &'static str, message: impl Into<String>, path: Option<&str>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.map(str::to_string),
        }
    }
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
    /// Node name is empty, too long, or contains non-letter characters
    pub const INVALID_NODE_NAME: &str = "ERR_GRAPH_VALIDATION_INVALID_NODE_NAME";

    /// The same node name is declared twice
    pub const DUPLICATE_NODE: &str = "ERR_GRAPH_VALIDATION_DUPLICATE_NODE";

    /// An edge endpoint does not name a declared node
    pub const DANGLING_EDGE: &str = "ERR_GRAPH_VALIDATION_DANGLING_EDGE";

    /// A declared node is not an endpoint of any edge
    pub const ISOLATED_NODE: &str = "ERR_GRAPH_VALIDATION_ISOLATED_NODE";

    /// The submission declares no nodes at all
    pub const EMPTY_GRAPH: &str = "ERR_GRAPH_VALIDATION_EMPTY_GRAPH";
}

/// Run every well-formedness check on a submitted graph, then the acyclicity check
///
/// Checks run in order and stop at the first failure: node names, edge
/// endpoints, global accordance, acyclicity. Nothing here touches storage.
pub fn validate_graph(graph: &NewGraph) -> Result<(), CoreError> {
    if graph.nodes.is_empty() {
        return Err(ValidationError::new(
            error_codes::EMPTY_GRAPH,
            "A graph must declare at least one node; empty graphs are never stored",
            Some("nodes"),
        )
        .into());
    }

    validate_nodes(&graph.nodes)?;
    validate_edges(&graph.nodes, &graph.edges)?;
    validate_structure(&graph.nodes, &graph.edges)?;

    crate::graph::acyclicity::topological_order(&graph.nodes, &graph.edges)
        .map(|_| ())
        .map_err(|cycle| CoreError::NotADag {
            remaining: cycle.remaining,
        })
}
