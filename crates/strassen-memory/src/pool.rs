//! Scratch buffer pool keyed by buffer length.
//!
//! Strassen temporaries are always square with a power-of-two (or cutoff
//! multiple) side, so the set of distinct lengths is one per recursion level.
//! Each length is its own size class.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::stats::{AtomicPoolStats, PoolStats};

/// Pool of reusable element buffers, organized by exact length.
pub struct BufferPool<T> {
    classes: Mutex<HashMap<usize, Vec<Vec<T>>>>,
    max_len: usize,
    max_per_class: usize,
    stats: AtomicPoolStats,
}

impl<T: Send> BufferPool<T> {
    /// Create a new pool.
    ///
    /// Buffers longer than `max_len` are never retained, and at most
    /// `max_per_class` buffers are kept for each length.
    #[must_use]
    pub fn new(max_len: usize, max_per_class: usize) -> Self {
        Self {
            classes: Mutex::new(HashMap::new()),
            max_len,
            max_per_class,
            stats: AtomicPoolStats::new(),
        }
    }

    /// Take a buffer of exactly `len` elements from the pool.
    ///
    /// Returns `None` on a miss; the caller allocates in that case. The
    /// contents of a returned buffer are whatever its previous user left.
    pub fn acquire(&self, len: usize) -> Option<Vec<T>> {
        let mut classes = self.classes.lock();
        if let Some(buf) = classes.get_mut(&len).and_then(Vec::pop) {
            self.stats.record_hit();
            return Some(buf);
        }
        self.stats.record_miss();
        None
    }

    /// Return a buffer to the pool.
    pub fn release(&self, buf: Vec<T>) {
        let len = buf.len();
        if len == 0 || len > self.max_len {
            self.stats.record_eviction();
            return;
        }

        let mut classes = self.classes.lock();
        let class = classes.entry(len).or_default();
        if class.len() < self.max_per_class {
            class.push(buf);
        } else {
            self.stats.record_eviction();
        }
    }

    /// Pre-populate the class for `len` with up to `count` buffers built by `make`.
    pub fn warm(&self, len: usize, count: usize, make: impl Fn(usize) -> Vec<T>) {
        if len == 0 || len > self.max_len {
            return;
        }
        let mut classes = self.classes.lock();
        let class = classes.entry(len).or_default();
        let to_add = count
            .saturating_sub(class.len())
            .min(self.max_per_class.saturating_sub(class.len()));
        for _ in 0..to_add {
            class.push(make(len));
        }
    }

    /// Get total number of pooled buffers.
    #[must_use]
    pub fn total_pooled(&self) -> usize {
        self.classes.lock().values().map(Vec::len).sum()
    }

    /// Number of pooled buffers of exactly `len` elements.
    #[must_use]
    pub fn pooled_for(&self, len: usize) -> usize {
        self.classes.lock().get(&len).map_or(0, Vec::len)
    }

    /// Get a snapshot of pool statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Reset pool statistics counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Drop every pooled buffer.
    pub fn clear(&self) {
        self.classes.lock().clear();
    }
}

impl<T: Send> Default for BufferPool<T> {
    fn default() -> Self {
        // 4096 x 4096 elements; three temporaries per recursion level.
        Self::new(1 << 24, 8)
    }
}
