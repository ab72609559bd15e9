use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use dagstore_core::{CoreError, Graph, GraphId, GraphRepository, NewGraph, NodeRemoval};

/// In-memory implementation of the GraphRepository
pub struct InMemoryGraphRepository {
    graphs: Arc<RwLock<HashMap<i64, Graph>>>,
    last_id: Arc<AtomicI64>,
}

impl InMemoryGraphRepository {
    /// Create a new in-memory graph repository
    pub fn new(graphs: Arc<RwLock<HashMap<i64, Graph>>>, last_id: Arc<AtomicI64>) -> Self {
        Self { graphs, last_id }
    }

    /// Whether no graph is stored
    pub async fn is_empty(&self) -> bool {
        self.graphs.read().await.is_empty()
    }
}

impl Default for InMemoryGraphRepository {
    fn default() -> Self {
        Self::new(
            Arc::new(RwLock::new(HashMap::new())),
            Arc::new(AtomicI64::new(0)),
        )
    }
}

#[async_trait]
impl GraphRepository for InMemoryGraphRepository {
    async fn create_graph(&self, graph: &NewGraph) -> Result<Graph, CoreError> {
        let mut graphs = self.graphs.write().await;

        // Ids start at 1 and are never reused, even after a graph is removed
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Graph {
            id: GraphId(id),
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            created_at: Utc::now(),
        };
        graphs.insert(id, stored.clone());

        debug!(graph_id = id, "Stored graph in memory");
        Ok(stored)
    }

    async fn find_by_id(&self, id: GraphId) -> Result<Option<Graph>, CoreError> {
        let graphs = self.graphs.read().await;
        Ok(graphs.get(&id.0).cloned())
    }

    async fn remove_node(&self, id: GraphId, name: &str) -> Result<Option<NodeRemoval>, CoreError> {
        let mut graphs = self.graphs.write().await;

        let Some(graph) = graphs.get_mut(&id.0) else {
            return Ok(None);
        };
        let Some(position) = graph.nodes.iter().position(|node| node.name == name) else {
            return Ok(None);
        };

        graph.nodes.remove(position);
        let edges_before = graph.edges.len();
        graph.edges.retain(|edge| !edge.touches(name));
        let edges_removed = edges_before - graph.edges.len();

        let graph_removed = graph.nodes.is_empty();
        if graph_removed {
            graphs.remove(&id.0);
        }

        debug!(graph_id = %id, node = name, edges_removed, graph_removed, "Removed node from memory");
        Ok(Some(NodeRemoval {
            edges_removed,
            graph_removed,
        }))
    }
}
