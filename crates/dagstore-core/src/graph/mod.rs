//! Pure graph algorithms over in-memory node and edge lists.
//!
//! Nothing in this module performs I/O; every function is a deterministic
//! function of its arguments.

/// Kahn's algorithm based acyclicity check
pub mod acyclicity;

/// Forward and reverse adjacency list construction
pub mod adjacency;
