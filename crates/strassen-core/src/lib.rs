//! # strassen-core
//!
//! Core library for Strassen-rs: square matrix storage, block-submatrix
//! arithmetic, conventional O(n³) multiplication and Strassen's seven-product
//! recursion, with an optional hybrid cutoff below which the recursion hands
//! off to the conventional kernel.

pub mod base_case;
pub mod block;
pub mod constants;
pub mod conventional;
pub mod element;
pub mod error;
pub mod matrix;
pub mod memory_budget;
pub mod mode;
pub mod multiplier;
pub mod options;
pub mod registry;
pub mod scratch;
pub mod sizing;
pub mod strassen;

// Re-exports
pub use base_case::BaseCase;
pub use constants::{exit_codes, DEFAULT_HYBRID_CUTOFF, DEFAULT_MAX_RANDOM_VALUE};
pub use conventional::multiply;
pub use element::Element;
pub use error::MatrixError;
pub use matrix::Matrix;
pub use mode::{multiply_padded, MultiplyMode};
pub use multiplier::Multiplier;
pub use options::Options;
pub use registry::{DefaultFactory, MultiplierFactory};
pub use sizing::next_power_of_two;
pub use strassen::{strassen_multiply, strassen_multiply_hybrid};

/// Multiply two equal-side square matrices with pure Strassen recursion,
/// allocating the output.
///
/// Convenience wrapper over [`strassen_multiply`] for callers that do not
/// manage the output buffer themselves.
///
/// # Example
/// ```
/// use strassen_core::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5i64, 6], vec![7, 8]]).unwrap();
/// let c = strassen_core::product(&a, &b).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
/// ```
pub fn product<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
    let mut c = Matrix::allocate(a.side())?;
    strassen_multiply(a, b, &mut c)?;
    Ok(c)
}
