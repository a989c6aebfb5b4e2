//! Strassen's seven-product recursion.
//!
//! One kernel serves both pure and hybrid multiplication: the [`BaseCase`]
//! decides where recursion stops and is checked at every level. Preconditions
//! are validated once at the entry points, never inside the recursion.

use strassen_memory::BufferPool;
use tracing::debug;

use crate::base_case::BaseCase;
use crate::block::{add_in_place, copy, sub, sub_in_place, sum, Block, BlockMut};
use crate::conventional::check_sides;
use crate::element::Element;
use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::scratch::{HeapScratch, PooledScratch, ScratchAllocator, ScratchFrame};

/// `c = a × b` by pure Strassen recursion down to 1x1 blocks.
///
/// The side must be a power of two.
pub fn strassen_multiply<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
) -> Result<(), MatrixError> {
    multiply_recursive(a, b, c, BaseCase::Unit, &HeapScratch)
}

/// `c = a × b` by Strassen recursion that switches to the conventional
/// kernel once a block side is `<= cutoff`.
///
/// Halving the side must stay even until it reaches the cutoff.
pub fn strassen_multiply_hybrid<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    cutoff: usize,
) -> Result<(), MatrixError> {
    multiply_recursive(a, b, c, BaseCase::Cutoff(cutoff), &HeapScratch)
}

/// [`strassen_multiply`] with temporaries drawn from `pool`.
pub fn strassen_multiply_pooled<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    pool: &BufferPool<T>,
) -> Result<(), MatrixError> {
    multiply_recursive(a, b, c, BaseCase::Unit, &PooledScratch::new(pool))
}

/// [`strassen_multiply_hybrid`] with temporaries drawn from `pool`.
pub fn strassen_multiply_hybrid_pooled<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    cutoff: usize,
    pool: &BufferPool<T>,
) -> Result<(), MatrixError> {
    multiply_recursive(a, b, c, BaseCase::Cutoff(cutoff), &PooledScratch::new(pool))
}

/// Validate the operands against `base`, then run the recursion with
/// temporaries from `scratch`.
pub fn multiply_recursive<T, S>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    base: BaseCase,
    scratch: &S,
) -> Result<(), MatrixError>
where
    T: Element,
    S: ScratchAllocator<T> + ?Sized,
{
    check_sides(a, b, c)?;
    base.validate(a.side())?;
    debug!(side = a.side(), ?base, "strassen multiply");
    recurse(a, b, c, base, scratch)
}

fn recurse<T, S>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
    base: BaseCase,
    scratch: &S,
) -> Result<(), MatrixError>
where
    T: Element,
    S: ScratchAllocator<T> + ?Sized,
{
    let n = a.side();
    if base.is_reached(n) {
        base.solve(a, b, c);
        return Ok(());
    }

    let h = n / 2;
    let mut frame = ScratchFrame::acquire(scratch, h)?;
    let (lhs, rhs, p) = frame.parts();
    c.fill_zeros();

    // Each quadrant of C is first written by a copy, then only accumulated.

    // P1 = (A12 - A22)(B21 + B22)
    sub(Block::new(a, 0, h), Block::new(a, h, h), BlockMut::origin(lhs), h);
    sum(Block::new(b, h, 0), Block::new(b, h, h), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    copy(Block::origin(p), BlockMut::new(c, 0, 0), h);

    // P2 = (A11 + A22)(B11 + B22)
    sum(Block::new(a, 0, 0), Block::new(a, h, h), BlockMut::origin(lhs), h);
    sum(Block::new(b, 0, 0), Block::new(b, h, h), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    add_in_place(p, BlockMut::new(c, 0, 0), h);
    copy(Block::origin(p), BlockMut::new(c, h, h), h);

    // P3 = (A11 - A21)(B11 + B12)
    sub(Block::new(a, 0, 0), Block::new(a, h, 0), BlockMut::origin(lhs), h);
    sum(Block::new(b, 0, 0), Block::new(b, 0, h), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    sub_in_place(p, BlockMut::new(c, h, h), h);

    // P4 = (A11 + A12) B22
    sum(Block::new(a, 0, 0), Block::new(a, 0, h), BlockMut::origin(lhs), h);
    copy(Block::new(b, h, h), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    sub_in_place(p, BlockMut::new(c, 0, 0), h);
    copy(Block::origin(p), BlockMut::new(c, 0, h), h);

    // P5 = A11 (B12 - B22)
    copy(Block::new(a, 0, 0), BlockMut::origin(lhs), h);
    sub(Block::new(b, 0, h), Block::new(b, h, h), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    add_in_place(p, BlockMut::new(c, 0, h), h);
    add_in_place(p, BlockMut::new(c, h, h), h);

    // P6 = A22 (B21 - B11)
    copy(Block::new(a, h, h), BlockMut::origin(lhs), h);
    sub(Block::new(b, h, 0), Block::new(b, 0, 0), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    add_in_place(p, BlockMut::new(c, 0, 0), h);
    copy(Block::origin(p), BlockMut::new(c, h, 0), h);

    // P7 = (A21 + A22) B11
    sum(Block::new(a, h, 0), Block::new(a, h, h), BlockMut::origin(lhs), h);
    copy(Block::new(b, 0, 0), BlockMut::origin(rhs), h);
    recurse(lhs, rhs, p, base, scratch)?;
    add_in_place(p, BlockMut::new(c, h, 0), h);
    sub_in_place(p, BlockMut::new(c, h, h), h);

    Ok(())
}
