//! Mock implementations of DagStore interfaces.

pub mod graph_repository;

pub use graph_repository::*;
