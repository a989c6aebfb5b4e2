//! Calibration errors.

use strassen_core::MatrixError;

/// Error type for cutoff search and profile persistence.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    /// The configured size or cutoff range is empty or malformed.
    #[error("invalid calibration range: {0}")]
    InvalidRange(String),

    /// A timed multiplication failed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Reading or writing a profile or CSV file failed.
    #[error("calibration I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A profile could not be (de)serialized.
    #[error("profile serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
