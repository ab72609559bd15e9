use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::{
    domain::graph::{AdjacencyList, Graph, GraphId, NewGraph, NodeRemoval},
    domain::repository::GraphRepository,
    graph::adjacency::{build_forward, build_reverse},
    validation::validate_graph,
    CoreError,
};

/// Service for creating, querying and pruning stored graphs
///
/// Holds no per-request state; each call is independent and the repository
/// is responsible for transactional isolation.
pub struct GraphService {
    /// Repository for graphs
    graph_repo: Arc<dyn GraphRepository>,
}

impl GraphService {
    /// Create a new graph service
    pub fn new(graph_repo: Arc<dyn GraphRepository>) -> Self {
        Self { graph_repo }
    }

    /// Validate a submitted graph and store it
    ///
    /// Rejected submissions never reach the repository.
    pub async fn create_graph(&self, graph: NewGraph) -> Result<GraphId, CoreError> {
        let span = info_span!("create_graph", nodes = graph.nodes.len(), edges = graph.edges.len());
        async move {
            if let Err(err) = validate_graph(&graph) {
                warn!(error_code = err.error_code(), %err, "Graph rejected");
                return Err(err);
            }
            debug!("Graph passed validation");

            let stored = self.graph_repo.create_graph(&graph).await?;

            info!(graph_id = %stored.id, "Graph created");
            Ok(stored.id)
        }
        .instrument(span)
        .await
    }

    /// Fetch a stored graph with all of its nodes and edges
    pub async fn read_graph(&self, id: GraphId) -> Result<Graph, CoreError> {
        self.graph_repo
            .find_by_id(id)
            .await?
            .ok_or(CoreError::GraphNotFound(id))
    }

    /// Adjacency list of a stored graph: each node with its direct successors
    pub async fn get_adjacency(&self, id: GraphId) -> Result<AdjacencyList, CoreError> {
        let graph = self.read_graph(id).await?;
        Ok(build_forward(&graph.nodes, &graph.edges))
    }

    /// Reverse adjacency list of a stored graph: each node with its direct predecessors
    pub async fn get_reverse_adjacency(&self, id: GraphId) -> Result<AdjacencyList, CoreError> {
        let graph = self.read_graph(id).await?;
        Ok(build_reverse(&graph.nodes, &graph.edges))
    }

    /// Delete a node and every edge touching it
    ///
    /// A graph left without nodes is deleted as well. Missing graphs and
    /// nodes are reported before anything is removed.
    pub async fn delete_node(&self, id: GraphId, name: &str) -> Result<NodeRemoval, CoreError> {
        let span = info_span!("delete_node", graph_id = %id, node = %name);
        async move {
            let graph = self.read_graph(id).await?;
            if !graph.has_node(name) {
                return Err(CoreError::NodeNotFound {
                    graph_id: id,
                    name: name.to_string(),
                });
            }

            // The node may have been removed by a concurrent request since the lookup
            let removal = self
                .graph_repo
                .remove_node(id, name)
                .await?
                .ok_or_else(|| CoreError::NodeNotFound {
                    graph_id: id,
                    name: name.to_string(),
                })?;

            info!(
                edges_removed = removal.edges_removed,
                graph_removed = removal.graph_removed,
                "Node deleted"
            );
            Ok(removal)
        }
        .instrument(span)
        .await
    }

    /// Whether the backing repository is reachable
    pub async fn health(&self) -> Result<bool, CoreError> {
        self.graph_repo.health_check().await
    }
}
