/// Graph value types
pub mod graph;

/// Repository interfaces
pub mod repository;
