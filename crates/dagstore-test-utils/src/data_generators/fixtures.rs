//! Fixed graph submissions.

use dagstore_core::NewGraph;
use serde_json::{json, Value};

/// The four-node reference DAG: `a -> c`, `b -> c`, `c -> d`
pub fn sample_dag() -> NewGraph {
    NewGraph::from_names(&["a", "b", "c", "d"], &[("a", "c"), ("b", "c"), ("c", "d")])
}

/// [`sample_dag`] as a request body
pub fn sample_dag_json() -> Value {
    graph_json(&sample_dag())
}

/// [`sample_dag`] with the extra edge `c -> a`, closing a cycle
pub fn cyclic_graph() -> NewGraph {
    NewGraph::from_names(
        &["a", "b", "c", "d"],
        &[("a", "c"), ("b", "c"), ("c", "d"), ("c", "a")],
    )
}

/// [`sample_dag`] with node `d` renamed to `1`
pub fn bad_name_graph() -> NewGraph {
    NewGraph::from_names(&["a", "b", "c", "1"], &[("a", "c"), ("b", "c"), ("c", "d")])
}

/// A graph whose edge `c -> d` points at an undeclared node
pub fn dangling_edge_graph() -> NewGraph {
    NewGraph::from_names(&["a", "b", "c", "e"], &[("a", "c"), ("b", "c"), ("c", "d")])
}

/// A graph declaring node `e` that no edge touches
pub fn isolated_node_graph() -> NewGraph {
    NewGraph::from_names(
        &["a", "b", "c", "d", "e"],
        &[("a", "c"), ("b", "c"), ("c", "d")],
    )
}

/// A graph declaring node `a` twice
pub fn duplicate_node_graph() -> NewGraph {
    NewGraph::from_names(&["a", "b", "a"], &[("a", "b")])
}

/// Every fixture that must be refused, with a short label for assertion messages
pub fn rejected_graphs() -> Vec<(&'static str, NewGraph)> {
    vec![
        ("bad name", bad_name_graph()),
        ("dangling edge", dangling_edge_graph()),
        ("isolated node", isolated_node_graph()),
        ("duplicate node", duplicate_node_graph()),
        ("cycle", cyclic_graph()),
        ("empty", NewGraph::default()),
    ]
}

/// Serialize a submission into the `{"nodes": [...], "edges": [...]}` request shape
pub fn graph_json(graph: &NewGraph) -> Value {
    json!({
        "nodes": graph.nodes.iter().map(|node| json!({ "name": node.name })).collect::<Vec<_>>(),
        "edges": graph
            .edges
            .iter()
            .map(|edge| json!({ "source": edge.source, "target": edge.target }))
            .collect::<Vec<_>>(),
    })
}
