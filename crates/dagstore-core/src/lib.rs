//!
//! DagStore Core - graph validation and query engine
//!
//! This crate defines the domain model for stored graphs, the validation rules
//! a submitted graph must pass (well-formed names, structural consistency,
//! acyclicity), the adjacency list builders used by read queries, and the
//! repository interface persistence crates implement.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - graph value types and repository interfaces
pub mod domain;

/// Validation rules for submitted graphs
pub mod validation;

/// Pure graph algorithms (acyclicity, adjacency)
pub mod graph;

/// Application services
pub mod application;

/// Error types
pub mod error;

// Re-export key types
pub use application::graph_service::GraphService;
pub use domain::graph::{AdjacencyList, Edge, Graph, GraphId, NewGraph, Node, NodeRemoval};
pub use domain::repository::GraphRepository;
pub use error::CoreError;
pub use graph::acyclicity::{is_dag, topological_order, CycleDetected};
pub use graph::adjacency::{build_forward, build_reverse, invert};
pub use validation::{
    is_valid_name, validate_edges, validate_graph, validate_nodes, validate_structure,
    ValidationError,
};
