//! Random graph generators.
//!
//! Callers pass their own [`Rng`], so a seeded `StdRng` reproduces a failing case.

use dagstore_core::{Edge, NewGraph, Node};
use rand::seq::SliceRandom;
use rand::Rng;

/// A letter-only node name unique to `idx`
pub fn letter_name(idx: usize) -> String {
    let mut name = String::from("n");
    let mut rest = idx;
    loop {
        name.push((b'a' + (rest % 26) as u8) as char);
        rest /= 26;
        if rest == 0 {
            break;
        }
    }
    name
}

/// A connected DAG with `node_count` nodes and up to `extra_edges` additional forward edges
///
/// Nodes are shuffled into a random topological order; every node after the
/// first receives an edge from some earlier node, so no node is isolated.
pub fn random_dag<R: Rng + ?Sized>(rng: &mut R, node_count: usize, extra_edges: usize) -> NewGraph {
    let node_count = node_count.max(2);
    let mut names: Vec<String> = (0..node_count).map(letter_name).collect();
    names.shuffle(rng);

    let mut edges = Vec::with_capacity(node_count - 1 + extra_edges);
    for idx in 1..node_count {
        let parent = rng.gen_range(0..idx);
        edges.push(Edge::new(names[parent].clone(), names[idx].clone()));
    }
    for _ in 0..extra_edges {
        let from = rng.gen_range(0..node_count - 1);
        let to = rng.gen_range(from + 1..node_count);
        edges.push(Edge::new(names[from].clone(), names[to].clone()));
    }

    let mut nodes: Vec<Node> = names.into_iter().map(Node::new).collect();
    nodes.shuffle(rng);
    NewGraph::new(nodes, edges)
}

/// A directed ring of `len` nodes, optionally fed by a short acyclic tail
pub fn random_cycle<R: Rng + ?Sized>(rng: &mut R, len: usize) -> NewGraph {
    let len = len.max(1);
    let tail = rng.gen_range(0..3);
    let names: Vec<String> = (0..len + tail).map(letter_name).collect();

    let mut edges: Vec<Edge> = (0..len)
        .map(|idx| Edge::new(names[idx].clone(), names[(idx + 1) % len].clone()))
        .collect();
    for idx in len..len + tail {
        edges.push(Edge::new(names[idx].clone(), names[rng.gen_range(0..len)].clone()));
    }

    NewGraph::new(names.into_iter().map(Node::new).collect(), edges)
}
