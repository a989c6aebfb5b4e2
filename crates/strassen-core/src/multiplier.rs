//! Multiplier trait and the three algorithm implementations.
//!
//! `Multiplier` is the public trait consumed by orchestration. Each
//! implementation is a thin wrapper that fixes a [`MultiplyMode`] and,
//! optionally, a shared scratch pool.

use std::sync::Arc;

use strassen_memory::BufferPool;

use crate::element::Element;
use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::mode::MultiplyMode;

/// Public trait for matrix multipliers, consumed by orchestration.
pub trait Multiplier<T: Element>: Send + Sync {
    /// Compute `c = a × b`. All three share one side; `c` is overwritten.
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<(), MatrixError>;

    /// Get the name of this multiplier.
    fn name(&self) -> &str;

    /// The mode this multiplier runs.
    fn mode(&self) -> MultiplyMode;
}

fn run<T: Element>(
    mode: MultiplyMode,
    pool: Option<&BufferPool<T>>,
    a: &Matrix<T>,
    b: &Matrix<T>,
    c: &mut Matrix<T>,
) -> Result<(), MatrixError> {
    match pool {
        Some(pool) => mode.run_pooled(a, b, c, pool),
        None => mode.run(a, b, c),
    }
}

/// Textbook triple-loop multiplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalMultiplier;

impl ConventionalMultiplier {
    /// Create a new conventional multiplier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<T: Element> Multiplier<T> for ConventionalMultiplier {
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<(), MatrixError> {
        MultiplyMode::Conventional.run(a, b, c)
    }

    fn name(&self) -> &str {
        "Conventional"
    }

    fn mode(&self) -> MultiplyMode {
        MultiplyMode::Conventional
    }
}

/// Pure Strassen recursion down to 1x1 blocks.
pub struct StrassenMultiplier<T> {
    pool: Option<Arc<BufferPool<T>>>,
}

impl<T: Element> StrassenMultiplier<T> {
    /// Heap-allocated temporaries.
    #[must_use]
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Temporaries drawn from a shared pool.
    #[must_use]
    pub fn with_pool(pool: Arc<BufferPool<T>>) -> Self {
        Self { pool: Some(pool) }
    }
}

impl<T: Element> Default for StrassenMultiplier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Multiplier<T> for StrassenMultiplier<T> {
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<(), MatrixError> {
        run(MultiplyMode::Strassen, self.pool.as_deref(), a, b, c)
    }

    fn name(&self) -> &str {
        "Strassen"
    }

    fn mode(&self) -> MultiplyMode {
        MultiplyMode::Strassen
    }
}

/// Strassen recursion with a conventional base case at `cutoff`.
pub struct HybridMultiplier<T> {
    cutoff: usize,
    pool: Option<Arc<BufferPool<T>>>,
}

impl<T: Element> HybridMultiplier<T> {
    /// Heap-allocated temporaries.
    #[must_use]
    pub fn new(cutoff: usize) -> Self {
        Self { cutoff, pool: None }
    }

    /// Temporaries drawn from a shared pool.
    #[must_use]
    pub fn with_pool(cutoff: usize, pool: Arc<BufferPool<T>>) -> Self {
        Self {
            cutoff,
            pool: Some(pool),
        }
    }

    /// Configured cutoff.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }
}

impl<T: Element> Multiplier<T> for HybridMultiplier<T> {
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) -> Result<(), MatrixError> {
        run(self.mode(), self.pool.as_deref(), a, b, c)
    }

    fn name(&self) -> &str {
        "Hybrid"
    }

    fn mode(&self) -> MultiplyMode {
        MultiplyMode::Hybrid {
            cutoff: self.cutoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(pool: Option<Arc<BufferPool<i64>>>) -> Vec<Box<dyn Multiplier<i64>>> {
        match pool {
            Some(p) => vec![
                Box::new(ConventionalMultiplier::new()),
                Box::new(StrassenMultiplier::with_pool(Arc::clone(&p))),
                Box::new(HybridMultiplier::with_pool(2, p)),
            ],
            None => vec![
                Box::new(ConventionalMultiplier::new()),
                Box::new(StrassenMultiplier::new()),
                Box::new(HybridMultiplier::new(2)),
            ],
        }
    }

    #[test]
    fn known_product_from_every_multiplier() {
        let a = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5i64, 6], vec![7, 8]]).unwrap();
        for pool in [None, Some(Arc::new(BufferPool::default()))] {
            for m in all(pool) {
                let mut c = Matrix::allocate(2).unwrap();
                m.multiply(&a, &b, &mut c).unwrap();
                assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]], "{}", m.name());
            }
        }
    }

    #[test]
    fn names_and_modes() {
        let ms = all(None);
        let names: Vec<&str> = ms.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Conventional", "Strassen", "Hybrid"]);
        assert_eq!(ms[2].mode(), MultiplyMode::Hybrid { cutoff: 2 });
        assert_eq!(HybridMultiplier::<i64>::new(32).cutoff(), 32);
    }

    #[test]
    fn errors_propagate() {
        let a: Matrix<i64> = Matrix::allocate(3).unwrap();
        let mut c = Matrix::allocate(3).unwrap();
        let s = StrassenMultiplier::<i64>::new();
        assert_eq!(
            s.multiply(&a, &a, &mut c),
            Err(MatrixError::NotPowerOfTwo(3))
        );
        let h = HybridMultiplier::<i64>::new(0);
        assert_eq!(
            h.multiply(&a, &a, &mut c),
            Err(MatrixError::InvalidCutoff(0))
        );
    }
}
