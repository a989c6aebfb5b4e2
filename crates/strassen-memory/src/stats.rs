//! Allocation and pool statistics.
//!
//! Matrix allocations are tracked per thread: the multiplication kernels are
//! sequential, so a thread-local counter observes exactly the allocations made
//! by one multiply call, even while other tests run concurrently.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the matrix allocation counters for the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationStats {
    /// Matrices allocated since the last reset.
    pub allocations: u64,
    /// Matrices released since the last reset.
    pub releases: u64,
    /// Matrices currently alive.
    pub live: u64,
    /// Highest number of simultaneously live matrices.
    pub peak_live: u64,
    /// Bytes held by live matrices.
    pub live_bytes: usize,
    /// Highest value of `live_bytes`.
    pub peak_bytes: usize,
}

impl AllocationStats {
    const EMPTY: Self = Self {
        allocations: 0,
        releases: 0,
        live: 0,
        peak_live: 0,
        live_bytes: 0,
        peak_bytes: 0,
    };

    /// Allocations made since `earlier` was taken.
    #[must_use]
    pub fn allocations_since(&self, earlier: &Self) -> u64 {
        self.allocations - earlier.allocations
    }

    /// Net change in live matrices since `earlier` was taken.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn live_delta(&self, earlier: &Self) -> i64 {
        self.live as i64 - earlier.live as i64
    }
}

thread_local! {
    static TRACKER: Cell<AllocationStats> = const { Cell::new(AllocationStats::EMPTY) };
}

/// Record that a matrix holding `bytes` bytes was allocated on this thread.
pub fn record_allocation(bytes: usize) {
    TRACKER.with(|t| {
        let mut s = t.get();
        s.allocations += 1;
        s.live += 1;
        s.live_bytes += bytes;
        s.peak_live = s.peak_live.max(s.live);
        s.peak_bytes = s.peak_bytes.max(s.live_bytes);
        t.set(s);
    });
}

/// Record that a matrix holding `bytes` bytes was released on this thread.
pub fn record_release(bytes: usize) {
    TRACKER.with(|t| {
        let mut s = t.get();
        s.releases += 1;
        s.live = s.live.saturating_sub(1);
        s.live_bytes = s.live_bytes.saturating_sub(bytes);
        t.set(s);
    });
}

/// Take a snapshot of this thread's allocation counters.
#[must_use]
pub fn snapshot() -> AllocationStats {
    TRACKER.with(Cell::get)
}

/// Reset the peak counters to the current live values.
///
/// Totals and live counts are kept so that matrices allocated before the
/// reset are still released correctly.
pub fn reset_peaks() {
    TRACKER.with(|t| {
        let mut s = t.get();
        s.peak_live = s.live;
        s.peak_bytes = s.live_bytes;
        t.set(s);
    });
}

/// Statistics for buffer pool usage.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of cache hits (acquired from pool).
    pub hits: u64,
    /// Number of cache misses (caller had to allocate).
    pub misses: u64,
    /// Number of evictions (too large or class full).
    pub evictions: u64,
}

/// Atomic pool statistics for lock-free updates.
pub struct AtomicPoolStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl AtomicPoolStats {
    /// Create new zeroed stats.
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Take a snapshot of current stats.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    /// Increment hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment eviction counter.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AtomicPoolStats {
    fn default() -> Self {
        Self::new()
    }
}
