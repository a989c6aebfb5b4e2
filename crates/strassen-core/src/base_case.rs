//! Recursion base-case strategy.
//!
//! Pure and hybrid Strassen differ only in where the recursion stops, so the
//! kernel takes the stopping rule as a value instead of existing twice.

use serde::{Deserialize, Serialize};

use crate::conventional;
use crate::element::Element;
use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::sizing;

/// Where the Strassen recursion stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseCase {
    /// Recurse down to 1x1 blocks and multiply scalars.
    Unit,
    /// Hand blocks of side `<= n` to the conventional kernel.
    Cutoff(usize),
}

impl BaseCase {
    /// Whether a block of this side is solved directly.
    #[inline]
    pub fn is_reached(self, side: usize) -> bool {
        match self {
            Self::Unit => side <= 1,
            Self::Cutoff(n) => side <= n,
        }
    }

    /// Check that a top-level side is compatible with this base case.
    pub fn validate(self, side: usize) -> Result<(), MatrixError> {
        match self {
            Self::Unit => {
                if side.is_power_of_two() {
                    Ok(())
                } else {
                    Err(MatrixError::NotPowerOfTwo(side))
                }
            }
            Self::Cutoff(0) => Err(MatrixError::InvalidCutoff(0)),
            Self::Cutoff(cutoff) => match sizing::first_odd_above(side, cutoff) {
                None => Ok(()),
                Some(_) => Err(MatrixError::NotHalvable { side, cutoff }),
            },
        }
    }

    /// Solve a base-case block. `c` is overwritten.
    pub(crate) fn solve<T: Element>(self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) {
        match self {
            Self::Unit => {
                let p = a.as_slice()[0] * b.as_slice()[0];
                c.as_mut_slice()[0] = p;
            }
            Self::Cutoff(_) => conventional::multiply_unchecked(a, b, c),
        }
    }

    /// Effective cutoff side (1 for [`BaseCase::Unit`]).
    pub fn cutoff(self) -> usize {
        match self {
            Self::Unit => 1,
            Self::Cutoff(n) => n,
        }
    }
}
