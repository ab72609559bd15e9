//! Graph API handlers
//!
//! Request parsing failures (malformed JSON, missing fields, non-integer ids)
//! are turned into 422 responses before any handler logic runs.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use dagstore_core::{AdjacencyList, Edge, Graph, GraphId, NewGraph, Node};

use crate::api::errors::ApiError;
use crate::server::DagStoreServer;

/// Request body for creating a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGraphRequest {
    /// Declared nodes
    pub nodes: Vec<Node>,
    /// Directed edges between declared nodes
    pub edges: Vec<Edge>,
}

impl From<CreateGraphRequest> for NewGraph {
    fn from(request: CreateGraphRequest) -> Self {
        NewGraph::new(request.nodes, request.edges)
    }
}

/// Response for a created graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphCreatedResponse {
    /// Identifier of the stored graph
    pub id: GraphId,
}

/// Response for reading a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphReadResponse {
    /// Identifier of the stored graph
    pub id: GraphId,
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
    /// When the graph was stored
    pub created_at: DateTime<Utc>,
}

impl From<Graph> for GraphReadResponse {
    fn from(graph: Graph) -> Self {
        Self {
            id: graph.id,
            nodes: graph.nodes,
            edges: graph.edges,
            created_at: graph.created_at,
        }
    }
}

/// Response wrapping a forward or reverse adjacency list
#[derive(Debug, Clone, Serialize)]
pub struct AdjacencyListResponse {
    /// Node name to neighbour names
    pub adjacency_list: AdjacencyList,
}

/// Create a graph
pub async fn create_graph_handler(
    State(server): State<Arc<DagStoreServer>>,
    payload: Result<Json<CreateGraphRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let id = server.service().create_graph(request.into()).await?;

    Ok((StatusCode::CREATED, Json(GraphCreatedResponse { id })))
}

/// Read a graph with all its nodes and edges
pub async fn read_graph_handler(
    State(server): State<Arc<DagStoreServer>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<GraphReadResponse>, ApiError> {
    let Path(id) = path?;

    let graph = server.service().read_graph(GraphId(id)).await?;

    Ok(Json(graph.into()))
}

/// Get the adjacency list of a graph
pub async fn adjacency_list_handler(
    State(server): State<Arc<DagStoreServer>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AdjacencyListResponse>, ApiError> {
    let Path(id) = path?;

    let adjacency_list = server.service().get_adjacency(GraphId(id)).await?;

    Ok(Json(AdjacencyListResponse { adjacency_list }))
}

/// Get the reverse adjacency list of a graph
pub async fn reverse_adjacency_list_handler(
    State(server): State<Arc<DagStoreServer>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AdjacencyListResponse>, ApiError> {
    let Path(id) = path?;

    let adjacency_list = server.service().get_reverse_adjacency(GraphId(id)).await?;

    Ok(Json(AdjacencyListResponse { adjacency_list }))
}

/// Delete a node and its incident edges
pub async fn delete_node_handler(
    State(server): State<Arc<DagStoreServer>>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path((id, name)) = path?;

    let removal = server.service().delete_node(GraphId(id), &name).await?;
    debug!(graph_id = id, node = %name, graph_removed = removal.graph_removed, "Delete handled");

    Ok(StatusCode::NO_CONTENT)
}
