//! Configuration for the DagStore server
//!
//! Settings are layered, lowest priority first: built-in defaults, the
//! `DATABASE_URL` variable as the storage default, an optional `dagstore`
//! config file (`dagstore.toml`, `dagstore.yaml`, `dagstore.json`, ...), and
//! finally `DAGSTORE_*` environment variables such as `DAGSTORE_PORT`.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Where graphs are stored: `memory://` or a `postgres://` connection string
    #[serde(default = "default_storage_url")]
    pub storage_url: String,

    /// Maximum number of pooled database connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Timeout for acquiring a pooled connection, in seconds
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Whether to apply database migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,

    /// Log level, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_storage_url() -> String {
    "memory://".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_run_migrations() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            storage_url: default_storage_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            run_migrations: default_run_migrations(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Storage backend selected by the `storage_url` scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local store
    Memory,
    /// PostgreSQL, with the full connection string
    Postgres(String),
}

impl ServerConfig {
    /// Load configuration from defaults, `DATABASE_URL`, an optional config file and `DAGSTORE_*` variables
    pub fn load() -> ServerResult<Self> {
        Self::from_sources(
            std::env::var("DATABASE_URL").ok(),
            Some("dagstore"),
            Environment::with_prefix("DAGSTORE").try_parsing(true),
        )
    }

    pub(crate) fn from_sources(
        database_url: Option<String>,
        file: Option<&str>,
        env: Environment,
    ) -> ServerResult<Self> {
        let mut builder = Config::builder();

        if let Some(url) = database_url {
            builder = builder.set_default("storage_url", url)?;
        }
        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.storage_backend()?;
        Ok(config)
    }

    /// Resolve `storage_url` into a backend
    pub fn storage_backend(&self) -> ServerResult<StorageBackend> {
        let url = self.storage_url.trim();
        if url.starts_with("memory://") {
            Ok(StorageBackend::Memory)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(StorageBackend::Postgres(url.to_string()))
        } else {
            Err(ServerError::ConfigError(format!(
                "Unsupported storage URL '{}': expected memory:// or postgres://",
                self.storage_url
            )))
        }
    }
}
