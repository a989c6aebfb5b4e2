//! Strassen-rs library: application logic for the benchmarking driver.

pub mod app;
pub mod config;
pub mod errors;
