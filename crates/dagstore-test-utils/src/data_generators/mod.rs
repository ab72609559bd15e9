//! Test data generators for DagStore.
//!
//! Fixed fixtures for the accepted and rejected submissions the service is
//! expected to handle, plus seeded random DAGs and cycles.

mod fixtures;
mod random;

// Re-export all data generators for easy access
pub use fixtures::*;
pub use random::*;
