//! Orchestration interfaces.

use std::time::Duration;

use strassen_core::{Element, Matrix, MatrixError, MultiplyMode};

/// Trait for presenting results to the user.
pub trait ResultPresenter<T: Element>: Send + Sync {
    /// Present one multiplication result. `side` is the requested
    /// (unpadded) side.
    fn present_result(
        &self,
        algorithm: &str,
        side: usize,
        result: &Matrix<T>,
        duration: Duration,
        details: bool,
    );

    /// Present a comparison of several runs over the same operands.
    fn present_comparison(&self, results: &[MultiplyResult<T>]);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single multiplication.
#[derive(Debug, Clone)]
pub struct MultiplyResult<T: Element> {
    /// Multiplier name.
    pub algorithm: String,
    /// Mode the multiplier ran.
    pub mode: MultiplyMode,
    /// The product or a structured error.
    pub outcome: Result<Matrix<T>, MatrixError>,
    /// Time spent in the multiply call.
    pub duration: Duration,
}

impl<T: Element> MultiplyResult<T> {
    /// Whether the run produced a product.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
