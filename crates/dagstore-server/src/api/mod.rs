//! API module for the DagStore server
//!
//! This module contains the API routes and handlers.

use axum::{
    http::Uri,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod graph;
pub mod health;

use crate::server::DagStoreServer;
use errors::ApiError;

/// Build the router for API endpoints
pub fn build_router(server: Arc<DagStoreServer>) -> Router {
    Router::new()
        // Graph management
        .route("/api/graph", post(graph::create_graph_handler))
        .route("/api/graph/", post(graph::create_graph_handler))
        .route("/api/graph/:id", get(graph::read_graph_handler))
        .route("/api/graph/:id/", get(graph::read_graph_handler))
        .route("/api/graph/:id/adjacency_list", get(graph::adjacency_list_handler))
        .route(
            "/api/graph/:id/reverse_adjacency_list",
            get(graph::reverse_adjacency_list_handler),
        )
        .route("/api/graph/:id/node/:name", delete(graph::delete_node_handler))
        .route("/api/graph/:id/node/:name/", delete(graph::delete_node_handler))

        // Health check
        .route("/health", get(health::health_check))

        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())

        // Shared state
        .with_state(server)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
