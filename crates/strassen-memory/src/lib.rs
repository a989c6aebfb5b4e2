//! # strassen-memory
//!
//! Memory bookkeeping for the Strassen-rs workspace.
//!
//! Provides a per-thread tracker of live matrix allocations (used to verify
//! that every recursion temporary is released) and a size-classed pool of
//! scratch buffers that a caller can hand down the recursion.
#![warn(missing_docs)]

pub mod pool;
pub mod stats;

pub use pool::BufferPool;
pub use stats::{AllocationStats, PoolStats};
