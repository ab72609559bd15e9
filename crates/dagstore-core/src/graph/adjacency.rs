use crate::domain::graph::{AdjacencyList, Edge, Node};

/// Build the forward adjacency list: node name to direct successors
///
/// Sources are keyed in the order they first appear in `edges`, followed by
/// the remaining declared nodes with empty lists. Successors are appended in
/// edge order, so parallel edges produce repeated entries.
pub fn build_forward(nodes: &[Node], edges: &[Edge]) -> AdjacencyList {
    let mut forward = AdjacencyList::new();

    for edge in edges {
        forward.entry(&edge.source).push(edge.target.clone());
    }
    for node in nodes {
        forward.entry(&node.name);
    }

    forward
}

/// Build the reverse adjacency list: node name to direct predecessors
pub fn build_reverse(nodes: &[Node], edges: &[Edge]) -> AdjacencyList {
    invert(&build_forward(nodes, edges))
}

/// Invert an adjacency list, turning every `source -> target` pair into `target -> source`
///
/// Every key of `forward` stays a key of the result. Predecessors are listed
/// in the key order of `forward`, which for [`build_forward`] is the order
/// each source first appears in the edge list.
pub fn invert(forward: &AdjacencyList) -> AdjacencyList {
    let mut reverse = AdjacencyList::new();

    for (source, targets) in forward {
        for target in targets {
            reverse.entry(target).push(source.clone());
        }
    }
    for name in forward.keys() {
        reverse.entry(name);
    }

    reverse
}
