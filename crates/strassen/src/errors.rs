//! Error handling and exit codes.

use strassen_calibration::CalibrationError;
use strassen_core::constants::exit_codes;
use strassen_core::MatrixError;

/// Exit code for a multiplication error.
pub fn handle_error(err: &MatrixError) -> i32 {
    match err {
        MatrixError::Allocation { .. } => exit_codes::ERROR_ALLOCATION,
        MatrixError::Mismatch => exit_codes::ERROR_MISMATCH,
        MatrixError::Calculation(_) => exit_codes::ERROR_GENERIC,
        MatrixError::InvalidSide(_)
        | MatrixError::NotSquare(_)
        | MatrixError::SideMismatch { .. }
        | MatrixError::NotPowerOfTwo(_)
        | MatrixError::NotHalvable { .. }
        | MatrixError::InvalidCutoff(_)
        | MatrixError::Config(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Exit code for any error reaching the application edge.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<MatrixError>() {
        return handle_error(e);
    }
    match err.downcast_ref::<CalibrationError>() {
        Some(CalibrationError::Matrix(e)) => handle_error(e),
        Some(CalibrationError::InvalidRange(_)) => exit_codes::ERROR_CONFIG,
        Some(CalibrationError::Io(_) | CalibrationError::Serde(_)) | None => {
            exit_codes::ERROR_GENERIC
        }
    }
}
