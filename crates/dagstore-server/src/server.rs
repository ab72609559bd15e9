//! Main DagStore server implementation

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use dagstore_core::{GraphRepository, GraphService};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Main server implementation
pub struct DagStoreServer {
    /// Configuration
    pub config: ServerConfig,

    /// Graph service shared by all request handlers
    service: GraphService,
}

/// Manual Debug implementation that doesn't try to debug the service
impl std::fmt::Debug for DagStoreServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DagStoreServer")
            .field("config", &self.config)
            .finish()
    }
}

impl DagStoreServer {
    /// Create a new server over the given graph repository
    pub fn new(config: ServerConfig, graph_repo: Arc<dyn GraphRepository>) -> Self {
        Self {
            config,
            service: GraphService::new(graph_repo),
        }
    }

    /// The graph service handlers delegate to
    pub fn service(&self) -> &GraphService {
        &self.service
    }

    /// Run the server until Ctrl-C or SIGTERM
    pub async fn run(self) -> ServerResult<()> {
        info!("Starting DagStore server");

        // Create and bind the TCP listener
        let listener = TcpListener::bind((self.config.bind_address.as_str(), self.config.port)).await?;
        info!("Listening on {}", listener.local_addr()?);

        let app = crate::api::build_router(Arc::new(self));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
