//! Integration test host for the Strassen-rs workspace.
//!
//! The cross-crate tests live under `tests/`.
