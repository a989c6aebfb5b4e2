//! Block-submatrix arithmetic.
//!
//! A block is a square region of a matrix addressed by its top-left
//! `(row, col)` offset; its size is passed to each primitive. Callers keep
//! every addressed block inside its matrix. Slice indexing still panics on a
//! violation, so an offset bug fails loudly rather than corrupting memory.

use crate::element::Element;
use crate::matrix::Matrix;

/// Read-only view of a square region starting at `(row, col)`.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a, T: Element> {
    matrix: &'a Matrix<T>,
    row: usize,
    col: usize,
}

impl<'a, T: Element> Block<'a, T> {
    /// View starting at `(row, col)` of `matrix`.
    #[inline]
    pub fn new(matrix: &'a Matrix<T>, row: usize, col: usize) -> Self {
        Self { matrix, row, col }
    }

    /// View starting at the origin of `matrix`.
    #[inline]
    pub fn origin(matrix: &'a Matrix<T>) -> Self {
        Self::new(matrix, 0, 0)
    }

    #[inline]
    fn row_slice(&self, i: usize, size: usize) -> &'a [T] {
        let start = (self.row + i) * self.matrix.side() + self.col;
        &self.matrix.as_slice()[start..start + size]
    }
}

/// Writable view of a square region starting at `(row, col)`.
#[derive(Debug)]
pub struct BlockMut<'a, T: Element> {
    matrix: &'a mut Matrix<T>,
    row: usize,
    col: usize,
}

impl<'a, T: Element> BlockMut<'a, T> {
    /// View starting at `(row, col)` of `matrix`.
    #[inline]
    pub fn new(matrix: &'a mut Matrix<T>, row: usize, col: usize) -> Self {
        Self { matrix, row, col }
    }

    /// View starting at the origin of `matrix`.
    #[inline]
    pub fn origin(matrix: &'a mut Matrix<T>) -> Self {
        Self::new(matrix, 0, 0)
    }

    #[inline]
    fn row_slice_mut(&mut self, i: usize, size: usize) -> &mut [T] {
        let start = (self.row + i) * self.matrix.side() + self.col;
        &mut self.matrix.as_mut_slice()[start..start + size]
    }
}

/// `c = a + b` over a `size x size` block.
pub fn sum<T: Element>(a: Block<'_, T>, b: Block<'_, T>, mut c: BlockMut<'_, T>, size: usize) {
    for i in 0..size {
        let (ra, rb) = (a.row_slice(i, size), b.row_slice(i, size));
        for ((z, &x), &y) in c.row_slice_mut(i, size).iter_mut().zip(ra).zip(rb) {
            *z = x + y;
        }
    }
}

/// `c = a - b` over a `size x size` block.
pub fn sub<T: Element>(a: Block<'_, T>, b: Block<'_, T>, mut c: BlockMut<'_, T>, size: usize) {
    for i in 0..size {
        let (ra, rb) = (a.row_slice(i, size), b.row_slice(i, size));
        for ((z, &x), &y) in c.row_slice_mut(i, size).iter_mut().zip(ra).zip(rb) {
            *z = x - y;
        }
    }
}

/// `b += a`, where `a` is read from its own origin.
///
/// `a` is always a freshly computed product whose whole content is the
/// block being merged, so it carries no offset.
pub fn add_in_place<T: Element>(a: &Matrix<T>, mut b: BlockMut<'_, T>, size: usize) {
    let a = Block::origin(a);
    for i in 0..size {
        let ra = a.row_slice(i, size);
        for (z, &x) in b.row_slice_mut(i, size).iter_mut().zip(ra) {
            *z += x;
        }
    }
}

/// `b -= a`, where `a` is read from its own origin.
pub fn sub_in_place<T: Element>(a: &Matrix<T>, mut b: BlockMut<'_, T>, size: usize) {
    let a = Block::origin(a);
    for i in 0..size {
        let ra = a.row_slice(i, size);
        for (z, &x) in b.row_slice_mut(i, size).iter_mut().zip(ra) {
            *z -= x;
        }
    }
}

/// `c = a` over a `size x size` block.
pub fn copy<T: Element>(a: Block<'_, T>, mut c: BlockMut<'_, T>, size: usize) {
    for i in 0..size {
        c.row_slice_mut(i, size)
            .copy_from_slice(a.row_slice(i, size));
    }
}
