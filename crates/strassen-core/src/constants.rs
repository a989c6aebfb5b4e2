//! Constants for multiplication modes, benchmarking and calibration.

/// Default hybrid cutoff (side length) when none is configured or calibrated.
pub const DEFAULT_HYBRID_CUTOFF: usize = 64;

/// Default upper bound for random operand entries.
pub const DEFAULT_MAX_RANDOM_VALUE: u64 = 9;

/// Default side used by the benchmarking driver.
pub const DEFAULT_BENCH_SIDE: usize = 256;

/// Matrix sizes swept by the cutoff search.
pub const CALIBRATION_SIZES: [usize; 3] = [512, 1024, 2048];

/// Smallest cutoff tried by the cutoff search.
pub const CALIBRATION_MIN_CUTOFF: usize = 8;

/// Largest cutoff tried by the cutoff search.
pub const CALIBRATION_MAX_CUTOFF: usize = 64;

/// Step between tried cutoffs.
pub const CALIBRATION_CUTOFF_STEP: usize = 4;

/// Timed runs averaged per (size, cutoff) pair.
pub const CALIBRATION_TRIALS: u32 = 3;

/// Process exit codes for the benchmarking driver.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Multiplier results did not match during cross-validation.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration or precondition violation.
    pub const ERROR_CONFIG: i32 = 4;
    /// Matrix allocation failed.
    pub const ERROR_ALLOCATION: i32 = 5;
}
