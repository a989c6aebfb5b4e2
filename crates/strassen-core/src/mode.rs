//! Multiplication mode selection and the padded top-level flow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strassen_memory::BufferPool;
use tracing::debug;

use crate::base_case::BaseCase;
use crate::constants::DEFAULT_HYBRID_CUTOFF;
use crate::conventional;
use crate::element::Element;
use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::scratch::{HeapScratch, PooledScratch};
use crate::sizing::checked_next_power_of_two;
use crate::strassen::multiply_recursive;

/// Which multiplication algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplyMode {
    /// Textbook O(n³) triple loop.
    Conventional,
    /// Strassen recursion down to 1x1 blocks.
    Strassen,
    /// Strassen recursion with a conventional base case at `cutoff`.
    Hybrid { cutoff: usize },
}

impl MultiplyMode {
    /// Short name used in reports and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Conventional => "conventional",
            Self::Strassen => "strassen",
            Self::Hybrid { .. } => "hybrid",
        }
    }

    /// Recursion base case, or `None` for the conventional mode.
    pub fn base_case(self) -> Option<BaseCase> {
        match self {
            Self::Conventional => None,
            Self::Strassen => Some(BaseCase::Unit),
            Self::Hybrid { cutoff } => Some(BaseCase::Cutoff(cutoff)),
        }
    }

    /// Run `c = a × b` in this mode with heap-allocated temporaries.
    pub fn run<T: Element>(
        self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        c: &mut Matrix<T>,
    ) -> Result<(), MatrixError> {
        match self.base_case() {
            None => conventional::multiply(a, b, c),
            Some(base) => multiply_recursive(a, b, c, base, &HeapScratch),
        }
    }

    /// Run `c = a × b` in this mode with temporaries drawn from `pool`.
    pub fn run_pooled<T: Element>(
        self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        c: &mut Matrix<T>,
        pool: &BufferPool<T>,
    ) -> Result<(), MatrixError> {
        match self.base_case() {
            None => conventional::multiply(a, b, c),
            Some(base) => multiply_recursive(a, b, c, base, &PooledScratch::new(pool)),
        }
    }
}

impl fmt::Display for MultiplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hybrid { cutoff } => write!(f, "hybrid(cutoff={cutoff})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for MultiplyMode {
    type Err = MatrixError;

    /// Parses `conventional` (alias `naive`), `strassen`, `hybrid` or
    /// `hybrid:<cutoff>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "conventional" | "naive" => Ok(Self::Conventional),
            "strassen" => Ok(Self::Strassen),
            "hybrid" => Ok(Self::Hybrid {
                cutoff: DEFAULT_HYBRID_CUTOFF,
            }),
            other => match other.strip_prefix("hybrid:") {
                Some(n) => n
                    .parse()
                    .map(|cutoff| Self::Hybrid { cutoff })
                    .map_err(|_| MatrixError::Config(format!("invalid hybrid cutoff: {n}"))),
                None => Err(MatrixError::Config(format!("unknown multiply mode: {s}"))),
            },
        }
    }
}

/// Multiply arbitrary-side operands.
///
/// Both operands are padded once to the next power of two with zeros, the
/// product is computed in `mode`, and the top-left region of the original
/// side is returned. Padding does not change that region.
pub fn multiply_padded<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    mode: MultiplyMode,
) -> Result<Matrix<T>, MatrixError> {
    let n = a.side();
    if b.side() != n {
        return Err(MatrixError::SideMismatch {
            a: n,
            b: b.side(),
            c: n,
        });
    }
    let padded = checked_next_power_of_two(n).ok_or(MatrixError::Allocation { side: n })?;
    debug!(side = n, padded, %mode, "padded multiply");

    if padded == n {
        let mut c = Matrix::allocate(n)?;
        mode.run(a, b, &mut c)?;
        return Ok(c);
    }

    let pa = a.padded_to(padded)?;
    let pb = b.padded_to(padded)?;
    let mut pc = Matrix::allocate(padded)?;
    mode.run(&pa, &pb, &mut pc)?;
    pc.truncated(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strassen_memory::stats;

    fn random(side: usize, seed: u64) -> Matrix<i64> {
        let mut m = Matrix::allocate(side).unwrap();
        m.fill_random_with(9, &mut StdRng::seed_from_u64(seed)).unwrap();
        m
    }

    #[test]
    fn parse_names() {
        assert_eq!("conventional".parse::<MultiplyMode>(), Ok(MultiplyMode::Conventional));
        assert_eq!("naive".parse::<MultiplyMode>(), Ok(MultiplyMode::Conventional));
        assert_eq!("Strassen".parse::<MultiplyMode>(), Ok(MultiplyMode::Strassen));
        assert_eq!(
            "hybrid".parse::<MultiplyMode>(),
            Ok(MultiplyMode::Hybrid {
                cutoff: DEFAULT_HYBRID_CUTOFF
            })
        );
        assert_eq!(
            "hybrid:16".parse::<MultiplyMode>(),
            Ok(MultiplyMode::Hybrid { cutoff: 16 })
        );
        assert!(matches!(
            "hybrid:x".parse::<MultiplyMode>(),
            Err(MatrixError::Config(_))
        ));
        assert!(matches!(
            "winograd".parse::<MultiplyMode>(),
            Err(MatrixError::Config(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(MultiplyMode::Strassen.to_string(), "strassen");
        assert_eq!(
            MultiplyMode::Hybrid { cutoff: 8 }.to_string(),
            "hybrid(cutoff=8)"
        );
    }

    #[test]
    fn serde_round_trip_shape() {
        let json = serde_json::to_string(&MultiplyMode::Hybrid { cutoff: 32 }).unwrap();
        assert_eq!(json, r#"{"hybrid":{"cutoff":32}}"#);
        let json = serde_json::to_string(&MultiplyMode::Conventional).unwrap();
        assert_eq!(json, r#""conventional""#);
        let back: MultiplyMode = serde_json::from_str(r#"{"hybrid":{"cutoff":4}}"#).unwrap();
        assert_eq!(back, MultiplyMode::Hybrid { cutoff: 4 });
    }

    #[test]
    fn padding_is_neutral() {
        for n in [3usize, 5, 6, 7, 12] {
            let a = random(n, n as u64);
            let b = random(n, 100 + n as u64);
            let mut expected = Matrix::allocate(n).unwrap();
            conventional::multiply(&a, &b, &mut expected).unwrap();

            for mode in [
                MultiplyMode::Conventional,
                MultiplyMode::Strassen,
                MultiplyMode::Hybrid { cutoff: 1 },
                MultiplyMode::Hybrid { cutoff: 2 },
            ] {
                let c = multiply_padded(&a, &b, mode).unwrap();
                assert_eq!(c.side(), n);
                assert_eq!(c, expected, "n {n}, {mode}");
            }
        }
    }

    #[test]
    fn padded_power_of_two_skips_copies() {
        let a = random(8, 1);
        let b = random(8, 2);
        let before = stats::snapshot();
        let c = multiply_padded(&a, &b, MultiplyMode::Conventional).unwrap();
        assert_eq!(stats::snapshot().allocations_since(&before), 1);
        assert_eq!(c.side(), 8);
    }

    #[test]
    fn padded_leaves_only_the_result_live() {
        let a = random(5, 1);
        let b = random(5, 2);
        let before = stats::snapshot();
        let c = multiply_padded(&a, &b, MultiplyMode::Strassen).unwrap();
        assert_eq!(stats::snapshot().live_delta(&before), 1);
        drop(c);
        assert_eq!(stats::snapshot().live_delta(&before), 0);
    }

    #[test]
    fn padded_rejects_mismatch() {
        let a = random(3, 1);
        let b = random(4, 2);
        assert!(matches!(
            multiply_padded(&a, &b, MultiplyMode::Strassen),
            Err(MatrixError::SideMismatch { .. })
        ));
    }

    #[test]
    fn run_pooled_dispatches() {
        let pool = BufferPool::default();
        let a = random(8, 3);
        let b = random(8, 4);
        let mut expected = Matrix::allocate(8).unwrap();
        MultiplyMode::Conventional.run(&a, &b, &mut expected).unwrap();
        for mode in [MultiplyMode::Strassen, MultiplyMode::Hybrid { cutoff: 2 }] {
            let mut c = Matrix::allocate(8).unwrap();
            mode.run_pooled(&a, &b, &mut c, &pool).unwrap();
            assert_eq!(c, expected);
        }
        assert!(pool.total_pooled() > 0);
    }
}
