//! Testing utilities for DagStore.
//!
//! Graph fixtures and random graph generators, assertion helpers for adjacency
//! lists, and a mockall-based [`GraphRepository`](dagstore_core::GraphRepository)
//! mock shared by the storage and server test suites.

pub mod assertions;
pub mod data_generators;
pub mod mocks;

/// Re-export commonly used types for convenience
pub use mockall;

pub use mocks::MockGraphRepository;
