//! Error type shared by the multiplication engine.

/// Errors raised by matrix construction and multiplication.
///
/// `Allocation` is the only runtime failure; the remaining variants are
/// precondition violations detected at the top-level entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A matrix buffer of the given side could not be reserved.
    #[error("allocation failed for a {side}x{side} matrix")]
    Allocation { side: usize },

    /// Matrices must have a side of at least one.
    #[error("invalid matrix side {0}: side must be at least 1")]
    InvalidSide(usize),

    /// Input data does not describe a square matrix.
    #[error("matrix is not square: {0}")]
    NotSquare(String),

    /// Operands and output do not share the same side.
    #[error("side mismatch: A is {a}, B is {b}, C is {c}")]
    SideMismatch { a: usize, b: usize, c: usize },

    /// Pure Strassen recursion needs a power-of-two side.
    #[error("side {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// Hybrid recursion reaches an odd side above the cutoff.
    #[error("side {side} cannot be halved down to cutoff {cutoff}")]
    NotHalvable { side: usize, cutoff: usize },

    /// The hybrid cutoff must be at least one.
    #[error("invalid cutoff {0}: cutoff must be at least 1")]
    InvalidCutoff(usize),

    /// Configuration error (unknown multiplier name, bad option value).
    #[error("configuration error: {0}")]
    Config(String),

    /// A multiplication run failed for a reason reported as text.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Results from different multipliers don't match.
    #[error("result mismatch between multipliers")]
    Mismatch,
}

impl MatrixError {
    /// Whether this error is a programmer-side precondition violation
    /// rather than a runtime failure.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidSide(_)
                | Self::NotSquare(_)
                | Self::SideMismatch { .. }
                | Self::NotPowerOfTwo(_)
                | Self::NotHalvable { .. }
                | Self::InvalidCutoff(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = MatrixError::Allocation { side: 8 };
        assert_eq!(err.to_string(), "allocation failed for a 8x8 matrix");

        let err = MatrixError::NotPowerOfTwo(6);
        assert_eq!(err.to_string(), "side 6 is not a power of two");

        let err = MatrixError::SideMismatch { a: 2, b: 4, c: 2 };
        assert_eq!(err.to_string(), "side mismatch: A is 2, B is 4, C is 2");
    }

    #[test]
    fn precondition_classification() {
        assert!(MatrixError::NotPowerOfTwo(3).is_precondition());
        assert!(MatrixError::InvalidCutoff(0).is_precondition());
        assert!(MatrixError::NotHalvable { side: 12, cutoff: 2 }.is_precondition());
        assert!(!MatrixError::Allocation { side: 1 }.is_precondition());
        assert!(!MatrixError::Mismatch.is_precondition());
    }
}
