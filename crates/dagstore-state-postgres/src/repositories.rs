use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder, Transaction};
use tracing::debug;

use dagstore_core::{CoreError, Edge, Graph, GraphId, GraphRepository, NewGraph, Node, NodeRemoval};

use crate::PostgresConnection;

/// Rows per multi-row INSERT, keeping bind parameters well under the protocol limit
const INSERT_CHUNK_ROWS: usize = 1000;

#[derive(Debug, Clone, FromRow)]
struct GraphRow {
    id: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
struct NodeRow {
    name: String,
}

#[derive(Debug, Clone, FromRow)]
struct EdgeRow {
    source: String,
    target: String,
}

fn db_err(context: &str, err: sqlx::Error) -> CoreError {
    CoreError::StateStoreError(format!("{}: {}", context, err))
}

/// Postgres implementation of the GraphRepository
#[derive(Clone)]
pub struct PostgresGraphRepository {
    conn: PostgresConnection,
}

impl PostgresGraphRepository {
    /// Create a new Postgres graph repository
    pub fn new(conn: PostgresConnection) -> Self {
        Self { conn }
    }

    async fn insert_nodes(
        tx: &mut Transaction<'_, Postgres>,
        graph_id: i64,
        nodes: &[Node],
    ) -> Result<(), CoreError> {
        for chunk in nodes.chunks(INSERT_CHUNK_ROWS) {
            let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO nodes (graph_id, name) ");
            builder.push_values(chunk, |mut row, node| {
                row.push_bind(graph_id).push_bind(&node.name);
            });
            builder
                .build()
                .execute(&mut **tx)
                .await
                .map_err(|e| db_err("Failed to insert nodes", e))?;
        }
        Ok(())
    }

    async fn insert_edges(
        tx: &mut Transaction<'_, Postgres>,
        graph_id: i64,
        edges: &[Edge],
    ) -> Result<(), CoreError> {
        for chunk in edges.chunks(INSERT_CHUNK_ROWS) {
            let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO edges (graph_id, source, target) ");
            builder.push_values(chunk, |mut row, edge| {
                row.push_bind(graph_id)
                    .push_bind(&edge.source)
                    .push_bind(&edge.target);
            });
            builder
                .build()
                .execute(&mut **tx)
                .await
                .map_err(|e| db_err("Failed to insert edges", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl GraphRepository for PostgresGraphRepository {
    async fn create_graph(&self, graph: &NewGraph) -> Result<Graph, CoreError> {
        let mut tx = self
            .conn
            .pool()
            .begin()
            .await
            .map_err(|e| db_err("Failed to start transaction", e))?;

        let header = sqlx::query_as::<_, GraphRow>(
            "INSERT INTO graphs DEFAULT VALUES RETURNING id, created_at",
        )
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_err("Failed to create graph", e))?;

        // Dropping the transaction on any error below rolls the header back too
        Self::insert_nodes(&mut tx, header.id, &graph.nodes).await?;
        Self::insert_edges(&mut tx, header.id, &graph.edges).await?;

        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))?;

        debug!(graph_id = header.id, "Stored graph in PostgreSQL");
        Ok(Graph {
            id: GraphId(header.id),
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            created_at: header.created_at,
        })
    }

    async fn find_by_id(&self, id: GraphId) -> Result<Option<Graph>, CoreError> {
        let mut tx = self
            .conn
            .pool()
            .begin()
            .await
            .map_err(|e| db_err("Failed to start transaction", e))?;

        // One snapshot for the header, nodes and edges
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to set isolation level", e))?;

        let header = sqlx::query_as::<_, GraphRow>("SELECT id, created_at FROM graphs WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to query graph", e))?;
        let Some(header) = header else {
            return Ok(None);
        };

        let nodes = sqlx::query_as::<_, NodeRow>("SELECT name FROM nodes WHERE graph_id = $1 ORDER BY id ASC")
            .bind(id.0)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to query graph nodes", e))?;

        let edges = sqlx::query_as::<_, EdgeRow>(
            "SELECT source, target FROM edges WHERE graph_id = $1 ORDER BY id ASC",
        )
        .bind(id.0)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_err("Failed to query graph edges", e))?;

        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))?;

        Ok(Some(Graph {
            id: GraphId(header.id),
            nodes: nodes.into_iter().map(|row| Node::new(row.name)).collect(),
            edges: edges
                .into_iter()
                .map(|row| Edge::new(row.source, row.target))
                .collect(),
            created_at: header.created_at,
        }))
    }

    async fn remove_node(&self, id: GraphId, name: &str) -> Result<Option<NodeRemoval>, CoreError> {
        let mut tx = self
            .conn
            .pool()
            .begin()
            .await
            .map_err(|e| db_err("Failed to start transaction", e))?;

        // Serializes removals within one graph
        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM graphs WHERE id = $1 FOR UPDATE")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to lock graph", e))?;
        if locked.is_none() {
            return Ok(None);
        }

        let deleted = sqlx::query("DELETE FROM nodes WHERE graph_id = $1 AND name = $2")
            .bind(id.0)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to delete node", e))?
            .rows_affected();
        if deleted == 0 {
            return Ok(None);
        }

        let edges_removed = sqlx::query("DELETE FROM edges WHERE graph_id = $1 AND (source = $2 OR target = $2)")
            .bind(id.0)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to delete incident edges", e))?
            .rows_affected();

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM nodes WHERE graph_id = $1")
            .bind(id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to count remaining nodes", e))?;

        let graph_removed = remaining == 0;
        if graph_removed {
            sqlx::query("DELETE FROM graphs WHERE id = $1")
                .bind(id.0)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_err("Failed to delete empty graph", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))?;

        debug!(graph_id = %id, node = name, edges_removed, graph_removed, "Removed node from PostgreSQL");
        Ok(Some(NodeRemoval {
            edges_removed: edges_removed as usize,
            graph_removed,
        }))
    }

    async fn health_check(&self) -> Result<bool, CoreError> {
        sqlx::query("SELECT 1")
            .execute(self.conn.pool())
            .await
            .map_err(|e| db_err("Health check failed", e))?;
        Ok(true)
    }
}
