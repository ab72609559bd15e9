use std::collections::HashSet;

use super::name::check_name;
use super::{error_codes, ValidationError};
use crate::domain::graph::{Edge, Node};

/// Validate node names and their uniqueness
///
/// Every name must be well-formed and no name may be declared twice. The
/// first offending node fails the whole batch.
pub fn validate_nodes(nodes: &[Node]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(nodes.len());

    for (idx, node) in nodes.iter().enumerate() {
        let path = format!("nodes[{}]", idx);
        check_name(&node.name, &path)?;

        if !seen.insert(node.name.as_str()) {
            return Err(ValidationError::new(
                error_codes::DUPLICATE_NODE,
                format!("Duplicate node name: '{}' - node names must be unique within a graph", node.name),
                Some(path.as_str()),
            ));
        }
    }

    Ok(())
}

/// Validate that every edge endpoint names a declared node
pub fn validate_edges(nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationError> {
    let declared = declared_names(nodes);
    check_endpoints(&declared, edges)
}

/// Validate global accordance between nodes and edges
///
/// Every declared node must be the source or target of at least one edge,
/// and edge endpoints are checked against the declared nodes once more.
pub fn validate_structure(nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationError> {
    let connected: HashSet<&str> = edges
        .iter()
        .flat_map(|edge| [edge.source.as_str(), edge.target.as_str()])
        .collect();

    for (idx, node) in nodes.iter().enumerate() {
        if !connected.contains(node.name.as_str()) {
            return Err(ValidationError::new(
                error_codes::ISOLATED_NODE,
                format!("Node '{}' is not connected to any edge", node.name),
                Some(format!("nodes[{}]", idx).as_str()),
            ));
        }
    }

    check_endpoints(&declared_names(nodes), edges)
}

fn declared_names(nodes: &[Node]) -> HashSet<&str> {
    nodes.iter().map(|node| node.name.as_str()).collect()
}

fn check_endpoints(declared: &HashSet<&str>, edges: &[Edge]) -> Result<(), ValidationError> {
    for (idx, edge) in edges.iter().enumerate() {
        for (field, name) in [("source", &edge.source), ("target", &edge.target)] {
            if !declared.contains(name.as_str()) {
                return Err(ValidationError::new(
                    error_codes::DANGLING_EDGE,
                    format!("Edge {} '{}' does not reference a declared node", field, name),
                    Some(format!("edges[{}].{}", idx, field).as_str()),
                ));
            }
        }
    }

    Ok(())
}
