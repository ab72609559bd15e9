//! Assertion utilities for adjacency lists.

mod adjacency;

pub use adjacency::*;
