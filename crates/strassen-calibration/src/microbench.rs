//! Micro-benchmarks for calibration.

use strassen_core::{Matrix, MultiplyMode, DEFAULT_MAX_RANDOM_VALUE};
use strassen_orchestration::{build_operands, OperandFill};

use crate::error::CalibrationError;
use crate::runner::{benchmark_detailed, BenchmarkResult};

/// Random `i64` operands of a padded side, as the benchmarking driver builds them.
pub fn operands(
    side: usize,
    max_value: u64,
    seed: Option<u64>,
) -> Result<(Matrix<i64>, Matrix<i64>), CalibrationError> {
    Ok(build_operands(side, OperandFill::Random { max_value, seed })?)
}

/// Time `trials` runs of `mode` on prebuilt operands, without warm-up.
pub fn time_mode_on(
    a: &Matrix<i64>,
    b: &Matrix<i64>,
    mode: MultiplyMode,
    trials: u32,
) -> Result<BenchmarkResult, CalibrationError> {
    let mut c = Matrix::allocate(a.side())?;
    let result = benchmark_detailed(0, trials, || mode.run(a, b, &mut c))?;
    Ok(result.with_name(mode.to_string()))
}

/// Time `mode` at a requested side (padded to the next power of two).
pub fn time_mode(
    side: usize,
    mode: MultiplyMode,
    trials: u32,
) -> Result<BenchmarkResult, CalibrationError> {
    let (a, b) = operands(side, DEFAULT_MAX_RANDOM_VALUE, None)?;
    time_mode_on(&a, &b, mode, trials)
}

/// Time the hybrid multiply at `side` with the given cutoff.
pub fn time_hybrid(
    side: usize,
    cutoff: usize,
    trials: u32,
) -> Result<BenchmarkResult, CalibrationError> {
    time_mode(side, MultiplyMode::Hybrid { cutoff }, trials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_hybrid_small() {
        let result = time_hybrid(16, 4, 2).unwrap();
        assert_eq!(result.iterations, 2);
        assert_eq!(result.name, "hybrid(cutoff=4)");
        assert!(result.min <= result.max);
    }

    #[test]
    fn time_mode_pads_odd_sides() {
        let result = time_mode(5, MultiplyMode::Strassen, 1).unwrap();
        assert_eq!(result.name, "strassen");
    }

    #[test]
    fn invalid_cutoff_is_an_error() {
        let err = time_hybrid(8, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::Matrix(strassen_core::MatrixError::InvalidCutoff(0))
        ));
    }

    #[test]
    fn seeded_operands_are_stable() {
        let (a1, _) = operands(4, 9, Some(3)).unwrap();
        let (a2, _) = operands(4, 9, Some(3)).unwrap();
        assert_eq!(a1, a2);
    }
}
