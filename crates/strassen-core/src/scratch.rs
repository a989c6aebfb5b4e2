//! Scratch matrices for the recursion.
//!
//! Each recursion frame needs three `h x h` temporaries: two operands and a
//! product. A [`ScratchAllocator`] hands them out and takes them back, and a
//! [`ScratchFrame`] holds one frame's set and returns it on drop, so every
//! exit path (including `?`) gives the temporaries back.

use strassen_memory::BufferPool;

use crate::element::Element;
use crate::error::MatrixError;
use crate::matrix::Matrix;

/// Source of scratch matrices.
///
/// Acquired matrices have unspecified contents; the kernel overwrites every
/// element before reading.
pub trait ScratchAllocator<T: Element> {
    /// Get a `side x side` matrix.
    fn acquire(&self, side: usize) -> Result<Matrix<T>, MatrixError>;

    /// Take back a matrix obtained from [`ScratchAllocator::acquire`].
    ///
    /// The matrix is dropped right after this returns; an implementation that
    /// keeps the storage moves the buffer out first.
    fn recycle(&self, matrix: &mut Matrix<T>);
}

/// Fresh heap allocation per temporary.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapScratch;

impl<T: Element> ScratchAllocator<T> for HeapScratch {
    fn acquire(&self, side: usize) -> Result<Matrix<T>, MatrixError> {
        Matrix::allocate(side)
    }

    fn recycle(&self, _matrix: &mut Matrix<T>) {}
}

/// Temporaries drawn from, and returned to, a caller-provided pool.
///
/// The pool outlives the multiply call, so repeated multiplications of the
/// same size reuse the buffers of the previous run.
#[derive(Clone, Copy)]
pub struct PooledScratch<'p, T> {
    pool: &'p BufferPool<T>,
}

impl<'p, T> PooledScratch<'p, T> {
    /// Draw from `pool`.
    pub fn new(pool: &'p BufferPool<T>) -> Self {
        Self { pool }
    }
}

impl<T: Element> ScratchAllocator<T> for PooledScratch<'_, T> {
    fn acquire(&self, side: usize) -> Result<Matrix<T>, MatrixError> {
        let len = side
            .checked_mul(side)
            .ok_or(MatrixError::Allocation { side })?;
        match self.pool.acquire(len) {
            Some(buf) => Ok(Matrix::from_recycled(side, buf)),
            None => Matrix::allocate(side),
        }
    }

    fn recycle(&self, matrix: &mut Matrix<T>) {
        self.pool.release(matrix.take_buffer());
    }
}

/// The three temporaries owned by one recursion frame.
pub struct ScratchFrame<'s, T: Element, S: ScratchAllocator<T> + ?Sized> {
    scratch: &'s S,
    left: Matrix<T>,
    right: Matrix<T>,
    product: Matrix<T>,
}

impl<'s, T: Element, S: ScratchAllocator<T> + ?Sized> ScratchFrame<'s, T, S> {
    /// Acquire three `side x side` temporaries from `scratch`.
    ///
    /// If a later acquisition fails, the ones already taken are dropped
    /// before the error propagates.
    pub fn acquire(scratch: &'s S, side: usize) -> Result<Self, MatrixError> {
        let left = scratch.acquire(side)?;
        let right = scratch.acquire(side)?;
        let product = scratch.acquire(side)?;
        Ok(Self {
            scratch,
            left,
            right,
            product,
        })
    }

    /// Split into `(left, right, product)`.
    pub fn parts(&mut self) -> (&mut Matrix<T>, &mut Matrix<T>, &mut Matrix<T>) {
        (&mut self.left, &mut self.right, &mut self.product)
    }
}

impl<T: Element, S: ScratchAllocator<T> + ?Sized> Drop for ScratchFrame<'_, T, S> {
    fn drop(&mut self) {
        self.scratch.recycle(&mut self.left);
        self.scratch.recycle(&mut self.right);
        self.scratch.recycle(&mut self.product);
    }
}
