//! Operand preparation for the benchmarking driver.
//!
//! Operands are allocated at the padded side (next power of two) and only
//! the requested top-left region is filled; the padding stays zero.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use strassen_core::sizing::checked_next_power_of_two;
use strassen_core::{Element, Matrix, MatrixError};

/// How to fill the requested region of each operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandFill {
    /// Every entry is one.
    Ones,
    /// Uniform integers in `[0, max_value]`, seeded when `seed` is set.
    Random { max_value: u64, seed: Option<u64> },
}

/// Build the two padded operands for a requested side.
pub fn build_operands<T: Element>(
    side: usize,
    fill: OperandFill,
) -> Result<(Matrix<T>, Matrix<T>), MatrixError> {
    if side == 0 {
        return Err(MatrixError::InvalidSide(0));
    }
    let padded = checked_next_power_of_two(side).ok_or(MatrixError::Allocation { side })?;
    debug!(side, padded, ?fill, "building operands");

    let mut a = Matrix::allocate(padded)?;
    let mut b = Matrix::allocate(padded)?;
    match fill {
        OperandFill::Ones => {
            fill_region(&mut a, side, T::one);
            fill_region(&mut b, side, T::one);
        }
        OperandFill::Random { max_value, seed } => {
            if T::from_u64(max_value).is_none() {
                return Err(MatrixError::Config(format!(
                    "max value {max_value} is not representable by the element type"
                )));
            }
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let mut draw = || T::from_u64(rng.gen_range(0..=max_value)).unwrap_or_else(T::zero);
            fill_region(&mut a, side, &mut draw);
            fill_region(&mut b, side, &mut draw);
        }
    }
    Ok((a, b))
}

fn fill_region<T: Element>(m: &mut Matrix<T>, side: usize, mut next: impl FnMut() -> T) {
    for i in 0..side {
        for j in 0..side {
            m.set(i, j, next());
        }
    }
}
