//! Graph domain model
//!
//! Graphs are handled as whole snapshots: a repository returns every node and
//! edge of a graph at once and the core never mutates a node in place, so the
//! types here are plain values with no references back to their owner.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// Identifier assigned to a graph when it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(pub i64);

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named vertex of a graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Node name, unique within its graph
    pub name: String,
}

impl Node {
    /// Create a node with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A directed edge between two nodes of the same graph, referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Name of the node the edge leaves
    pub source: String,
    /// Name of the node the edge enters
    pub target: String,
}

impl Edge {
    /// Create an edge from `source` to `target`
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether `name` is either endpoint of this edge
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}

/// A graph submitted for creation, not yet validated or stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGraph {
    /// Declared nodes
    pub nodes: Vec<Node>,
    /// Directed edges between declared nodes
    pub edges: Vec<Edge>,
}

impl NewGraph {
    /// Create a submission from nodes and edges
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Build a submission from plain name slices and `(source, target)` pairs
    pub fn from_names(nodes: &[&str], edges: &[(&str, &str)]) -> Self {
        Self {
            nodes: nodes.iter().map(|name| Node::new(*name)).collect(),
            edges: edges
                .iter()
                .map(|(source, target)| Edge::new(*source, *target))
                .collect(),
        }
    }
}

/// A stored graph snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Storage identifier
    pub id: GraphId,
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
    /// When the graph was stored
    pub created_at: DateTime<Utc>,
}

impl Graph {
    /// Whether the graph has a node called `name`
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|node| node.name == name)
    }
}

/// Outcome of removing a node together with its incident edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRemoval {
    /// Number of edges removed because they touched the node
    pub edges_removed: usize,
    /// Whether the graph itself was removed because no nodes were left
    pub graph_removed: bool,
}

/// Mapping from node name to the names of its direct neighbours
///
/// Keys iterate and serialize in the order they were first added. Inverting a
/// list walks it in that order, which fixes the order of predecessor entries.
/// Equality ignores key order but not the order of each neighbour list.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    keys: Vec<String>,
    entries: HashMap<String, Vec<String>>,
}

impl AdjacencyList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Neighbours of `key`, adding an empty entry at the end if it is missing
    pub fn entry(&mut self, key: &str) -> &mut Vec<String> {
        if !self.entries.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.entries.entry(key.to_string()).or_default()
    }

    /// Replace the neighbours of `key`, returning the previous ones
    pub fn insert(&mut self, key: String, values: Vec<String>) -> Option<Vec<String>> {
        if !self.entries.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.entries.insert(key, values)
    }

    /// Remove `key` and its neighbours
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let removed = self.entries.remove(key)?;
        self.keys.retain(|existing| existing != key);
        Some(removed)
    }

    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.keys.iter()
    }

    /// Entries in key insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.keys
            .iter()
            .filter_map(|key| self.entries.get(key).map(|values| (key, values)))
    }
}

impl PartialEq for AdjacencyList {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AdjacencyList {}

impl Index<&str> for AdjacencyList {
    type Output = Vec<String>;

    fn index(&self, key: &str) -> &Vec<String> {
        &self.entries[key]
    }
}

impl FromIterator<(String, Vec<String>)> for AdjacencyList {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (key, values) in iter {
            list.insert(key, values);
        }
        list
    }
}

impl<'a> IntoIterator for &'a AdjacencyList {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Box<dyn Iterator<Item = (&'a String, &'a Vec<String>)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for AdjacencyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, values) in self.iter() {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}
