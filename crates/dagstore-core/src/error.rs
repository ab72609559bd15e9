use thiserror::Error;

use crate::domain::graph::GraphId;
use crate::validation::{error_codes, ValidationError};

/// Core error type for DagStore
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A node name is malformed or duplicated
    #[error("Invalid node name: {0}")]
    InvalidNodeName(String),

    /// Edges reference undeclared nodes, or a node is not connected to any edge
    #[error("Invalid graph structure: {0}")]
    InvalidStructure(String),

    /// The edge set contains a directed cycle
    #[error("Graph is not a DAG: nodes {} cannot be topologically ordered", .remaining.join(", "))]
    NotADag {
        /// Nodes left unprocessed by the topological sort
        remaining: Vec<String>,
    },

    /// Graph not found
    #[error("Graph entity with id {0} not found")]
    GraphNotFound(GraphId),

    /// Node not found in an existing graph
    #[error("In graph with id {graph_id}, node with name {name} not found")]
    NodeNotFound {
        /// Graph that was searched
        graph_id: GraphId,
        /// Requested node name
        name: String,
    },

    /// State store error
    #[error("State store error: {0}")]
    StateStoreError(String),
}

impl CoreError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::InvalidNodeName(_) => "ERR_GRAPH_INVALID_NODE_NAME",
            CoreError::InvalidStructure(_) => "ERR_GRAPH_INVALID_STRUCTURE",
            CoreError::NotADag { .. } => "ERR_GRAPH_NOT_A_DAG",
            CoreError::GraphNotFound(_) => "ERR_NOT_FOUND_GRAPH",
            CoreError::NodeNotFound { .. } => "ERR_NOT_FOUND_NODE",
            CoreError::StateStoreError(_) => "ERR_STATE_STORE",
        }
    }

    /// Whether the error rejects a client submission (as opposed to a lookup miss or a storage fault)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidNodeName(_) | CoreError::InvalidStructure(_) | CoreError::NotADag { .. }
        )
    }

    /// Whether the error reports a missing graph or node
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::GraphNotFound(_) | CoreError::NodeNotFound { .. })
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        match err.code {
            error_codes::INVALID_NODE_NAME | error_codes::DUPLICATE_NODE => {
                CoreError::InvalidNodeName(err.to_string())
            }
            _ => CoreError::InvalidStructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (CoreError::InvalidNodeName("bad".to_string()), "Invalid node name: bad"),
            (CoreError::InvalidStructure("dangling".to_string()), "Invalid graph structure: dangling"),
            (
                CoreError::NotADag { remaining: vec!["a".to_string(), "c".to_string()] },
                "Graph is not a DAG: nodes a, c cannot be topologically ordered",
            ),
            (CoreError::GraphNotFound(GraphId(7)), "Graph entity with id 7 not found"),
            (
                CoreError::NodeNotFound { graph_id: GraphId(3), name: "x".to_string() },
                "In graph with id 3, node with name x not found",
            ),
            (CoreError::StateStoreError("db_err".to_string()), "State store error: db_err"),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_from_validation_error() {
        let name_err = ValidationError::new(error_codes::INVALID_NODE_NAME, "bad name", Some("nodes[0]"));
        assert!(matches!(CoreError::from(name_err), CoreError::InvalidNodeName(_)));

        let dup_err = ValidationError::new(error_codes::DUPLICATE_NODE, "dup", None);
        assert!(matches!(CoreError::from(dup_err), CoreError::InvalidNodeName(_)));

        let edge_err = ValidationError::new(error_codes::DANGLING_EDGE, "dangling", Some("edges[2].target"));
        match CoreError::from(edge_err) {
            CoreError::InvalidStructure(msg) => assert!(msg.contains("edges[2].target")),
            other => panic!("Expected InvalidStructure, got {:?}", other),
        }

        let isolated = ValidationError::new(error_codes::ISOLATED_NODE, "isolated", None);
        assert!(matches!(CoreError::from(isolated), CoreError::InvalidStructure(_)));
    }

    #[test]
    fn test_classification() {
        assert!(CoreError::NotADag { remaining: vec![] }.is_rejection());
        assert!(!CoreError::GraphNotFound(GraphId(1)).is_rejection());
        assert!(CoreError::GraphNotFound(GraphId(1)).is_not_found());
        assert!(!CoreError::StateStoreError("x".to_string()).is_not_found());
        assert_eq!(CoreError::GraphNotFound(GraphId(1)).error_code(), "ERR_NOT_FOUND_GRAPH");
    }
}
