//! Mock implementation of the GraphRepository trait.

use async_trait::async_trait;
use dagstore_core::{CoreError, Graph, GraphId, GraphRepository, NewGraph, NodeRemoval};
use mockall::mock;

mock! {
    pub GraphRepository {}

    #[async_trait]
    impl GraphRepository for GraphRepository {
        async fn create_graph(&self, graph: &NewGraph) -> Result<Graph, CoreError>;
        async fn find_by_id(&self, id: GraphId) -> Result<Option<Graph>, CoreError>;
        async fn remove_node(&self, id: GraphId, name: &str) -> Result<Option<NodeRemoval>, CoreError>;
        async fn health_check(&self) -> Result<bool, CoreError>;
    }
}

/// A repository whose every call fails as if the backing store were unreachable
pub fn create_unavailable_repository() -> MockGraphRepository {
    let unavailable = || CoreError::StateStoreError("connection refused".to_string());

    let mut repo = MockGraphRepository::new();
    repo.expect_create_graph().returning(move |_| Err(unavailable()));
    repo.expect_find_by_id().returning(move |_| Err(unavailable()));
    repo.expect_remove_node().returning(move |_, _| Err(unavailable()));
    repo.expect_health_check().returning(move || Err(unavailable()));
    repo
}
