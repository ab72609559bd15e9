//! Assertion utilities for forward and reverse adjacency lists.

use dagstore_core::{AdjacencyList, Node};
use thiserror::Error;

/// Error type for adjacency list validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdjacencyAssertionError {
    #[error("Node {0} has no entry in the adjacency list")]
    MissingKey(String),

    #[error("Adjacency list has entry {0} for an undeclared node")]
    UnexpectedKey(String),

    #[error("Edge {from} -> {to} appears {forward} time(s) forward but {reverse} time(s) in reverse")]
    Mismatch {
        from: String,
        to: String,
        forward: usize,
        reverse: usize,
    },
}

/// Asserts that the list's keys are exactly the declared node names.
pub fn assert_keys_match(nodes: &[Node], list: &AdjacencyList) -> Result<(), AdjacencyAssertionError> {
    for node in nodes {
        if !list.contains_key(&node.name) {
            return Err(AdjacencyAssertionError::MissingKey(node.name.clone()));
        }
    }
    for key in list.keys() {
        if !nodes.iter().any(|node| &node.name == key) {
            return Err(AdjacencyAssertionError::UnexpectedKey(key.clone()));
        }
    }
    Ok(())
}

/// Asserts that `reverse` holds every `forward` pair inverted, with matching multiplicity.
pub fn assert_inverse(forward: &AdjacencyList, reverse: &AdjacencyList) -> Result<(), AdjacencyAssertionError> {
    let count = |list: &AdjacencyList, key: &str, value: &str| {
        list.get(key)
            .map(|values| values.iter().filter(|v| *v == value).count())
            .unwrap_or(0)
    };

    for (source, targets) in forward {
        for target in targets {
            let forward_count = count(forward, source.as_str(), target.as_str());
            let reverse_count = count(reverse, target.as_str(), source.as_str());
            if forward_count != reverse_count {
                return Err(AdjacencyAssertionError::Mismatch {
                    from: source.clone(),
                    to: target.clone(),
                    forward: forward_count,
                    reverse: reverse_count,
                });
            }
        }
    }
    for (target, sources) in reverse {
        for source in sources {
            let forward_count = count(forward, source.as_str(), target.as_str());
            let reverse_count = count(reverse, target.as_str(), source.as_str());
            if forward_count != reverse_count {
                return Err(AdjacencyAssertionError::Mismatch {
                    from: source.clone(),
                    to: target.clone(),
                    forward: forward_count,
                    reverse: reverse_count,
                });
            }
        }
    }
    Ok(())
}
