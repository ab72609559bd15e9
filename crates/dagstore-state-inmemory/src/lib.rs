//! In-memory state store for DagStore
//!
//! This crate provides an in-memory implementation of the repository
//! interface defined in dagstore-core. Graphs live for the lifetime of the
//! process, which makes it useful for development, testing, and deployments
//! where persistence is not required.

use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use tokio::sync::RwLock;

use dagstore_core::{Graph, GraphRepository};

pub mod repositories;
pub use repositories::InMemoryGraphRepository;


/// Provider for in-memory graph repositories
///
/// Every repository handed out by the same provider shares one store.
pub struct InMemoryStateStoreProvider {
    // Shared storage for graphs, keyed by id
    graphs: Arc<RwLock<HashMap<i64, Graph>>>,

    // Last id handed out
    last_id: Arc<AtomicI64>,
}

impl InMemoryStateStoreProvider {
    /// Create a new in-memory state store provider
    pub fn new() -> Self {
        Self {
            graphs: Arc::new(RwLock::new(HashMap::new())),
            last_id: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Create a repository backed by this provider's store
    pub fn create_repository(&self) -> Arc<dyn GraphRepository> {
        Arc::new(InMemoryGraphRepository::new(
            self.graphs.clone(),
            self.last_id.clone(),
        ))
    }
}

impl Default for InMemoryStateStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}
