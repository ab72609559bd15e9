//! Repository traits for DagStore
//!
//! This module defines the persistence contract the graph service depends on.
//! External crates implement it to provide different storage mechanisms.

use async_trait::async_trait;

use super::graph::{Graph, GraphId, NewGraph, NodeRemoval};
use crate::CoreError;

/// Repository for stored graphs
///
/// Implementations must make every write atomic: either all rows of a
/// mutation become visible together or none of them do.
#[async_trait]
pub trait GraphRepository: Send + Sync {
    /// Store a validated graph with all of its nodes and edges in one unit
    async fn create_graph(&self, graph: &NewGraph) -> Result<Graph, CoreError>;

    /// Find a graph snapshot by ID
    async fn find_by_id(&self, id: GraphId) -> Result<Option<Graph>, CoreError>;

    /// Remove a node, every edge incident to it, and the graph if it ends up empty
    ///
    /// Returns `None` when the graph or the node no longer exists; nothing is
    /// changed in that case.
    async fn remove_node(&self, id: GraphId, name: &str) -> Result<Option<NodeRemoval>, CoreError>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<bool, CoreError> {
        Ok(true)
    }
}
