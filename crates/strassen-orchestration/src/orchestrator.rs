//! Core orchestration: sequential timed execution and result analysis.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use strassen_core::{Element, Matrix, MatrixError, Multiplier};

use crate::interfaces::MultiplyResult;

/// Run every multiplier on the same operands, one after another.
///
/// Each run gets a freshly allocated output; only the multiply call itself
/// is timed. Failures are recorded in the result rather than aborting the
/// remaining runs.
pub fn execute_multiplications<T: Element>(
    multipliers: &[Arc<dyn Multiplier<T>>],
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Vec<MultiplyResult<T>> {
    multipliers
        .iter()
        .map(|m| {
            let outcome = Matrix::allocate(a.side());
            let start = Instant::now();
            let outcome = outcome.and_then(|mut c| m.multiply(a, b, &mut c).map(|()| c));
            let duration = start.elapsed();

            let (algorithm, side) = (m.name(), a.side());
            match &outcome {
                Ok(_) => debug!(algorithm, side, ?duration, "multiply done"),
                Err(e) => warn!(algorithm, side, error = %e, "multiply failed"),
            }

            MultiplyResult {
                algorithm: m.name().to_string(),
                mode: m.mode(),
                outcome,
                duration,
            }
        })
        .collect()
}

/// Analyze comparison results for mismatches.
pub fn analyze_comparison_results<T: Element>(
    results: &[MultiplyResult<T>],
) -> Result<(), MatrixError> {
    let mut products = results.iter().filter_map(|r| r.outcome.as_ref().ok());

    // Compare all results to the first valid one
    let Some(first) = products.next() else {
        return Err(MatrixError::Calculation("no valid results".into()));
    };
    if products.any(|p| p != first) {
        return Err(MatrixError::Mismatch);
    }

    Ok(())
}
