//! Conventional O(n³) multiplication.

use tracing::debug;

use crate::element::Element;
use crate::error::MatrixError;
use crate::matrix::Matrix;

/// `c = a × b` by the textbook triple loop.
///
/// All three matrices must share one side. `c` is overwritten.
pub fn multiply<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
) -> Result<(), MatrixError> {
    check_sides(a, b, c)?;
    debug!(side = a.side(), "conventional multiply");
    multiply_unchecked(a, b, c);
    Ok(())
}

/// Check that `a`, `b` and `c` share one side.
pub(crate) fn check_sides<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &Matrix<T>,
) -> Result<(), MatrixError> {
    if a.side() == b.side() && b.side() == c.side() {
        Ok(())
    } else {
        Err(MatrixError::SideMismatch {
            a: a.side(),
            b: b.side(),
            c: c.side(),
        })
    }
}

/// Loop in i-k-j order: row `i` of `c` accumulates `a[i][k] * row k of b`.
/// Each `c[i][j]` still sums its terms in ascending `k`, the same order as
/// the i-j-k form.
pub(crate) fn multiply_unchecked<T: Element>(a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) {
    let n = a.side();
    let (a, b) = (a.as_slice(), b.as_slice());
    let c = c.as_mut_slice();
    c.fill(T::zero());
    for i in 0..n {
        let c_row = &mut c[i * n..(i + 1) * n];
        for k in 0..n {
            let aik = a[i * n + k];
            let b_row = &b[k * n..(k + 1) * n];
            for (z, &y) in c_row.iter_mut().zip(b_row) {
                *z += aik * y;
            }
        }
    }
}
