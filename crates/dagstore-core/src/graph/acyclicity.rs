//! Acyclicity check using Kahn's algorithm.
//!
//! The in-degree of every node is computed from the forward adjacency list, a
//! FIFO queue is seeded with every node of in-degree zero, and nodes are
//! popped one at a time while their successors' in-degrees are decremented.
//! A successor whose in-degree drops to zero joins the queue. The graph is a
//! DAG exactly when every node gets popped; whatever is left over lies on a
//! cycle or can only be reached through one.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use super::adjacency::build_forward;
use crate::domain::graph::{Edge, Node};

/// The node set could not be fully ordered because of at least one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDetected {
    /// Names of the nodes that were never processed, sorted
    pub remaining: Vec<String>,
    /// Number of nodes processed before the queue ran dry
    pub processed: usize,
}

impl fmt::Display for CycleDetected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycle detected: {} node(s) left unordered after processing {}: {}",
            self.remaining.len(),
            self.processed,
            self.remaining.join(", ")
        )
    }
}

impl std::error::Error for CycleDetected {}

/// Whether the nodes and edges form a directed acyclic graph
pub fn is_dag(nodes: &[Node], edges: &[Edge]) -> bool {
    topological_order(nodes, edges).is_ok()
}

/// Compute a topological order of the graph, or report the nodes a cycle blocks
///
/// Nodes that become ready at the same time are processed in the key order of
/// the forward adjacency list, so the result is reproducible. An empty node set yields an empty order.
pub fn topological_order(nodes: &[Node], edges: &[Edge]) -> Result<Vec<String>, CycleDetected> {
    let forward = build_forward(nodes, edges);

    let mut in_degree: HashMap<&str, usize> = forward.keys().map(|name| (name.as_str(), 0)).collect();
    for (_, targets) in forward.iter() {
        for target in targets {
            *in_degree.entry(target.as_str()).or_insert(0) += 1;
        }
    }

    // Seed from the forward keys rather than the hash map to keep FIFO order stable
    let mut queue: VecDeque<&str> = forward
        .keys()
        .map(String::as_str)
        .filter(|name| in_degree.get(name) == Some(&0))
        .collect();

    let mut order = Vec::with_capacity(in_degree.len());

    while let Some(current) = queue.pop_front() {
        order.push(current.to_string());

        let Some(successors) = forward.get(current) else {
            continue;
        };
        for successor in successors {
            if let Some(degree) = in_degree.get_mut(successor.as_str()) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(successor.as_str());
                }
            }
        }
    }

    // Counted against the declared nodes, so undeclared edge endpoints never pass
    if order.len() == nodes.len() && order.len() == in_degree.len() {
        return Ok(order);
    }

    let mut remaining: Vec<String> = in_degree
        .into_iter()
        .filter(|(_, degree)| *degree > 0)
        .map(|(name, _)| name.to_string())
        .collect();
    remaining.sort();

    Err(CycleDetected {
        remaining,
        processed: order.len(),
    })
}
