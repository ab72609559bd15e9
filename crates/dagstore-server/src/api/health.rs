//! Health check endpoint for the DagStore server

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::server::DagStoreServer;

/// Health check handler
///
/// Reports the server version and whether graph storage is reachable.
pub async fn health_check(State(server): State<Arc<DagStoreServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    let storage_up = match server.service().health().await {
        Ok(true) => true,
        Ok(false) => {
            warn!("Storage reported itself unhealthy");
            false
        }
        Err(err) => {
            warn!(%err, "Storage health check failed");
            false
        }
    };
    let status_label = if storage_up { "UP" } else { "DOWN" };

    let response = json!({
        "status": status_label,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "storage": { "status": status_label },
        },
    });

    let status = if storage_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
