//! Multiplication options and configuration.

use crate::constants::{DEFAULT_HYBRID_CUTOFF, DEFAULT_MAX_RANDOM_VALUE};

/// Options shared by the multipliers and the benchmarking driver.
#[derive(Debug, Clone)]
pub struct Options {
    /// Hybrid cutoff side (0 = default).
    pub cutoff: usize,
    /// Upper bound for random operand entries (0 = default).
    pub max_value: u64,
    /// Memory limit in bytes (0 = unlimited).
    pub memory_limit: usize,
    /// Draw recursion temporaries from a shared buffer pool.
    pub use_pool: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_HYBRID_CUTOFF,
            max_value: DEFAULT_MAX_RANDOM_VALUE,
            memory_limit: 0,
            use_pool: false,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.cutoff == 0 {
            self.cutoff = DEFAULT_HYBRID_CUTOFF;
        }
        if self.max_value == 0 {
            self.max_value = DEFAULT_MAX_RANDOM_VALUE;
        }
        self
    }

    /// Memory limit as an optional byte count.
    pub fn memory_limit(&self) -> Option<usize> {
        (self.memory_limit > 0).then_some(self.memory_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.cutoff, DEFAULT_HYBRID_CUTOFF);
        assert_eq!(opts.max_value, DEFAULT_MAX_RANDOM_VALUE);
        assert_eq!(opts.memory_limit(), None);
        assert!(!opts.use_pool);
    }

    #[test]
    fn normalize_zero_values() {
        let opts = Options {
            cutoff: 0,
            max_value: 0,
            ..Default::default()
        };
        let normalized = opts.normalize();
        assert_eq!(normalized.cutoff, DEFAULT_HYBRID_CUTOFF);
        assert_eq!(normalized.max_value, DEFAULT_MAX_RANDOM_VALUE);
    }

    #[test]
    fn normalize_keeps_explicit_values() {
        let opts = Options {
            cutoff: 16,
            max_value: 100,
            memory_limit: 1 << 20,
            use_pool: true,
        }
        .normalize();
        assert_eq!(opts.cutoff, 16);
        assert_eq!(opts.max_value, 100);
        assert_eq!(opts.memory_limit(), Some(1 << 20));
    }
}
