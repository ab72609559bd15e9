//!
//! DagStore Server - HTTP front end for graph storage
//!
//! Loads configuration, selects a storage backend, and serves the graph API.

// External dependencies
use std::sync::Arc;

use dagstore_core::GraphRepository;
use dagstore_state_inmemory::InMemoryStateStoreProvider;
use tracing::info;

/// API module
pub mod api;

/// Server module
pub mod server;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

// Re-export key types
pub use config::{LogFormat, ServerConfig, StorageBackend};
pub use error::{ServerError, ServerResult};
pub use server::DagStoreServer;

/// Run function
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    // Initialize logging
    init_logging(&config);

    // Create dependencies
    let graph_repo = create_repository(&config).await?;

    // Create and run server
    DagStoreServer::new(config, graph_repo).run().await
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging(config: &ServerConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    // Create filter based on config
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = fmt().with_env_filter(filter).with_target(true);
    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// Create the graph repository selected by `storage_url`
pub async fn create_repository(config: &ServerConfig) -> ServerResult<Arc<dyn GraphRepository>> {
    match config.storage_backend()? {
        StorageBackend::Memory => {
            info!("Using in-memory graph store");
            Ok(InMemoryStateStoreProvider::new().create_repository())
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres(connection_string) => {
            info!("Using PostgreSQL graph store");
            let postgres_config = dagstore_state_postgres::PostgresConfig {
                connection_string,
                max_connections: config.max_connections,
                acquire_timeout_secs: config.acquire_timeout_secs,
                run_migrations: config.run_migrations,
            };
            let provider = dagstore_state_postgres::PostgresStateStoreProvider::with_config(postgres_config).await?;
            Ok(provider.create_repository())
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres(_) => Err(ServerError::ConfigError(
            "PostgreSQL storage requested but the server was built without the `postgres` feature".to_string(),
        )),
    }
}
