//! Square matrix storage.
//!
//! A [`Matrix`] owns a contiguous row-major buffer of `side * side` elements.
//! Every live matrix is counted by the per-thread allocation tracker in
//! `strassen_memory::stats`; the count is taken on construction and dropped
//! exactly once in `Drop`.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::element::Element;
use crate::error::MatrixError;

/// Square, row-major matrix of numeric elements.
#[derive(Debug, PartialEq)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    side: usize,
}

impl<T: Element> Matrix<T> {
    /// Allocate a zero-filled `side x side` matrix.
    ///
    /// Reservation is fallible: a request the allocator cannot satisfy
    /// (or whose element count overflows) is reported as
    /// [`MatrixError::Allocation`] instead of aborting the process.
    pub fn allocate(side: usize) -> Result<Self, MatrixError> {
        if side == 0 {
            return Err(MatrixError::InvalidSide(0));
        }
        let len = side
            .checked_mul(side)
            .ok_or(MatrixError::Allocation { side })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::Allocation { side })?;
        data.resize(len, T::zero());
        Ok(Self::track(side, data))
    }

    /// Matrix with every element set to `value`.
    pub fn filled(side: usize, value: T) -> Result<Self, MatrixError> {
        let mut m = Self::allocate(side)?;
        m.fill_value(value);
        Ok(m)
    }

    /// Identity matrix of the given side.
    pub fn identity(side: usize) -> Result<Self, MatrixError> {
        let mut m = Self::allocate(side)?;
        for i in 0..side {
            m.set(i, i, T::one());
        }
        Ok(m)
    }

    /// Build a matrix from nested rows. Rows must form a non-empty square.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let side = rows.len();
        if side == 0 {
            return Err(MatrixError::NotSquare("no rows".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != side) {
            return Err(MatrixError::NotSquare(format!(
                "row {i} has {} columns, expected {side}",
                row.len()
            )));
        }
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Ok(Self::track(side, data))
    }

    /// Wrap a row-major buffer of exactly `side * side` elements.
    pub fn from_vec(side: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        if side == 0 {
            return Err(MatrixError::InvalidSide(0));
        }
        if side.checked_mul(side) != Some(data.len()) {
            return Err(MatrixError::NotSquare(format!(
                "buffer of {} elements for side {side}",
                data.len()
            )));
        }
        Ok(Self::track(side, data))
    }

    /// Adopt a recycled buffer. The length is the caller's invariant; the
    /// contents are unspecified until overwritten.
    pub(crate) fn from_recycled(side: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), side * side);
        Self::track(side, data)
    }

    fn track(side: usize, data: Vec<T>) -> Self {
        strassen_memory::stats::record_allocation(Self::bytes_for(side));
        Self { data, side }
    }

    fn bytes_for(side: usize) -> usize {
        side.saturating_mul(side)
            .saturating_mul(std::mem::size_of::<T>())
    }

    /// Release the matrix storage.
    ///
    /// Ownership makes a double release impossible; this is `drop` with a
    /// name that matches the allocation call.
    pub fn release(self) {
        drop(self);
    }

    /// Move the buffer out for recycling. The matrix must not be used again
    /// except to be dropped.
    pub(crate) fn take_buffer(&mut self) -> Vec<T> {
        std::mem::take(&mut self.data)
    }

    /// Side length (rows == columns).
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of elements (`side * side`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a live matrix; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes held by the element buffer.
    pub fn byte_size(&self) -> usize {
        Self::bytes_for(self.side)
    }

    /// Set every element to zero.
    pub fn fill_zeros(&mut self) {
        self.fill_value(T::zero());
    }

    /// Set every element to `value`.
    pub fn fill_value(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Fill with uniform random integers in `[0, max_value]` from the thread RNG.
    pub fn fill_random(&mut self, max_value: u64) -> Result<(), MatrixError> {
        self.fill_random_with(max_value, &mut rand::thread_rng())
    }

    /// Fill with uniform random integers in `[0, max_value]` drawn from `rng`.
    ///
    /// Fails with [`MatrixError::Config`] when `max_value` does not fit in `T`.
    pub fn fill_random_with<R: Rng + ?Sized>(
        &mut self,
        max_value: u64,
        rng: &mut R,
    ) -> Result<(), MatrixError> {
        if T::from_u64(max_value).is_none() {
            return Err(MatrixError::Config(format!(
                "max value {max_value} is not representable by the element type"
            )));
        }
        for x in &mut self.data {
            *x = T::from_u64(rng.gen_range(0..=max_value)).unwrap_or_else(T::zero);
        }
        Ok(())
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }

    /// Overwrite the element at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }

    /// Row-major element buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major element buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        debug_assert!(i < self.side, "row {i} out of range for side {}", self.side);
        let start = i * self.side;
        &self.data[start..start + self.side]
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.side).map(<[T]>::to_vec).collect()
    }

    /// Copy into the top-left corner of a zero-filled `side x side` matrix.
    ///
    /// `side` must be at least the current side.
    pub fn padded_to(&self, side: usize) -> Result<Self, MatrixError> {
        if side < self.side {
            return Err(MatrixError::InvalidSide(side));
        }
        let mut out = Self::allocate(side)?;
        for i in 0..self.side {
            let start = i * side;
            out.data[start..start + self.side].copy_from_slice(self.row(i));
        }
        Ok(out)
    }

    /// Extract the top-left `side x side` region.
    pub fn truncated(&self, side: usize) -> Result<Self, MatrixError> {
        if side == 0 || side > self.side {
            return Err(MatrixError::InvalidSide(side));
        }
        let mut data = Vec::new();
        data.try_reserve_exact(side * side)
            .map_err(|_| MatrixError::Allocation { side })?;
        for i in 0..side {
            data.extend_from_slice(&self.row(i)[..side]);
        }
        Ok(Self::track(side, data))
    }

    /// Fallible deep copy.
    pub fn try_clone(&self) -> Result<Self, MatrixError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| MatrixError::Allocation { side: self.side })?;
        data.extend_from_slice(&self.data);
        Ok(Self::track(self.side, data))
    }
}

impl<T: Element> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self::track(self.side, self.data.clone())
    }
}

impl<T: Element> Drop for Matrix<T> {
    fn drop(&mut self) {
        strassen_memory::stats::record_release(Self::bytes_for(self.side));
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(
            row < self.side && col < self.side,
            "({row},{col}) out of range for side {}",
            self.side
        );
        &self.data[row * self.side + col]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(
            row < self.side && col < self.side,
            "({row},{col}) out of range for side {}",
            self.side
        );
        &mut self.data[row * self.side + col]
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.side) {
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{x:>4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strassen_memory::stats;

    #[test]
    fn allocate_is_zeroed() {
        let m: Matrix<i64> = Matrix::allocate(3).unwrap();
        assert_eq!(m.side(), 3);
        assert_eq!(m.len(), 9);
        assert!(m.as_slice().iter().all(|&x| x == 0));
    }

    #[test]
    fn allocate_zero_side_rejected() {
        assert_eq!(
            Matrix::<i64>::allocate(0).unwrap_err(),
            MatrixError::InvalidSide(0)
        );
    }

    #[test]
    fn allocate_overflowing_side_fails_cleanly() {
        let err = Matrix::<i64>::allocate(usize::MAX).unwrap_err();
        assert_eq!(err, MatrixError::Allocation { side: usize::MAX });

        let huge = 1usize << (usize::BITS / 2 - 1);
        assert!(matches!(
            Matrix::<i64>::allocate(huge),
            Err(MatrixError::Allocation { .. })
        ));
    }

    #[test]
    fn row_major_indexing() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.get(0, 1), 2);
        assert_eq!(m.get(1, 0), 3);
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(m.row(1), &[3, 4]);
    }

    #[test]
    fn from_rows_rejects_ragged_and_empty() {
        assert!(matches!(
            Matrix::<i32>::from_rows(vec![vec![1, 2], vec![3]]),
            Err(MatrixError::NotSquare(_))
        ));
        assert!(matches!(
            Matrix::<i32>::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]),
            Err(MatrixError::NotSquare(_))
        ));
        assert!(matches!(
            Matrix::<i32>::from_rows(Vec::new()),
            Err(MatrixError::NotSquare(_))
        ));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Matrix::from_vec(2, vec![1, 2, 3, 4]).is_ok());
        assert!(matches!(
            Matrix::from_vec(2, vec![1, 2, 3]),
            Err(MatrixError::NotSquare(_))
        ));
        assert_eq!(
            Matrix::<i32>::from_vec(0, Vec::new()).unwrap_err(),
            MatrixError::InvalidSide(0)
        );
    }

    #[test]
    fn identity_has_unit_diagonal() {
        let m: Matrix<i32> = Matrix::identity(3).unwrap();
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]
        );
    }

    #[test]
    fn fill_random_respects_bound() {
        let mut m: Matrix<i64> = Matrix::allocate(16).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        m.fill_random_with(9, &mut rng).unwrap();
        assert!(m.as_slice().iter().all(|&x| (0..=9).contains(&x)));
    }

    #[test]
    fn fill_random_is_reproducible_with_seed() {
        let mut a: Matrix<i64> = Matrix::allocate(8).unwrap();
        let mut b: Matrix<i64> = Matrix::allocate(8).unwrap();
        a.fill_random_with(100, &mut StdRng::seed_from_u64(42)).unwrap();
        b.fill_random_with(100, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fill_random_rejects_unrepresentable_bound() {
        let mut m: Matrix<i8> = Matrix::allocate(2).unwrap();
        assert!(matches!(m.fill_random(1000), Err(MatrixError::Config(_))));
    }

    #[test]
    fn fill_zeros_and_value() {
        let mut m: Matrix<f64> = Matrix::filled(2, 3.5).unwrap();
        assert!(m.as_slice().iter().all(|&x| (x - 3.5).abs() < f64::EPSILON));
        m.fill_zeros();
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn pad_then_truncate_restores() {
        let m = Matrix::from_rows(vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
        ])
        .unwrap();
        let p = m.padded_to(4).unwrap();
        assert_eq!(p.side(), 4);
        assert_eq!(p.row(0), &[1, 2, 3, 0]);
        assert_eq!(p.row(3), &[0, 0, 0, 0]);
        assert_eq!(p.truncated(3).unwrap(), m);
    }

    #[test]
    fn pad_and_truncate_reject_wrong_direction() {
        let m: Matrix<i32> = Matrix::allocate(4).unwrap();
        assert_eq!(m.padded_to(2).unwrap_err(), MatrixError::InvalidSide(2));
        assert_eq!(m.truncated(5).unwrap_err(), MatrixError::InvalidSide(5));
        assert_eq!(m.truncated(0).unwrap_err(), MatrixError::InvalidSide(0));
    }

    #[test]
    fn display_prints_grid() {
        let m = Matrix::from_rows(vec![vec![1, 22], vec![333, 4]]).unwrap();
        assert_eq!(m.to_string(), "   1   22\n 333    4\n");
    }

    #[test]
    fn lifecycle_is_tracked() {
        let before = stats::snapshot();
        let a: Matrix<i64> = Matrix::allocate(4).unwrap();
        let b = a.clone();
        let c = a.try_clone().unwrap();
        let mid = stats::snapshot();
        assert_eq!(mid.allocations_since(&before), 3);
        assert_eq!(mid.live_bytes - before.live_bytes, 3 * 16 * 8);

        a.release();
        drop(b);
        drop(c);
        let after = stats::snapshot();
        assert_eq!(after.live_delta(&before), 0);
        assert_eq!(after.live_bytes, before.live_bytes);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn out_of_range_access_asserts_in_debug() {
        let m: Matrix<i32> = Matrix::allocate(2).unwrap();
        let _ = m.get(0, 2);
    }
}
