//! # strassen-calibration
//!
//! Empirical search for the hybrid cutoff: times the hybrid multiply over a
//! range of cutoffs at several matrix sizes, picks the fastest cutoff per
//! size, and persists the recommendation as a calibration profile.

pub mod calibration;
pub mod error;
pub mod io;
pub mod microbench;
pub mod profile;
pub mod runner;
pub mod search;

pub use calibration::{CalibrationEngine, CalibrationMode};
pub use error::CalibrationError;
pub use profile::CalibrationProfile;
pub use search::{CutoffSample, CutoffSearch, SearchReport, SizeOptimum};
