/// Bookkeeping table recording which migrations have been applied
pub const MIGRATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS dagstore_migrations (
    name TEXT PRIMARY KEY,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

/// Generate SQL migrations for the PostgreSQL graph store
///
/// Migrations are applied in order; names sort chronologically.
pub fn generate_migrations() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "20240601000000_initial_schema",
            r#"
            -- Graph headers
            CREATE TABLE IF NOT EXISTS graphs (
                id BIGSERIAL PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            -- Nodes, removed together with their graph
            CREATE TABLE IF NOT EXISTS nodes (
                id BIGSERIAL PRIMARY KEY,
                graph_id BIGINT NOT NULL REFERENCES graphs(id) ON DELETE CASCADE,
                name VARCHAR(255) NOT NULL,
                CONSTRAINT uq_nodes_graph_name UNIQUE (graph_id, name)
            );

            -- Edges reference their endpoints by name within the graph
            CREATE TABLE IF NOT EXISTS edges (
                id BIGSERIAL PRIMARY KEY,
                graph_id BIGINT NOT NULL REFERENCES graphs(id) ON DELETE CASCADE,
                source VARCHAR(255) NOT NULL,
                target VARCHAR(255) NOT NULL
            );
            "#,
        ),
        (
            "20240601000001_edge_indexes",
            r#"
            CREATE INDEX IF NOT EXISTS idx_edges_graph_id ON edges(graph_id);
            CREATE INDEX IF NOT EXISTS idx_edges_graph_source ON edges(graph_id, source);
            CREATE INDEX IF NOT EXISTS idx_edges_graph_target ON edges(graph_id, target);
            "#,
        ),
    ]
}
