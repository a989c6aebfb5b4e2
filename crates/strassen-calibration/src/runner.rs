//! Benchmark runner for calibration.
//!
//! The timed closures are fallible: a multiplication that fails (allocation,
//! bad cutoff) aborts the benchmark instead of being timed as a no-op.

use std::time::{Duration, Instant};

/// Run a benchmark with a warmup phase, timing each measured call.
pub fn benchmark_detailed<F, E>(
    warmup_iters: u32,
    measure_iters: u32,
    mut f: F,
) -> Result<BenchmarkResult, E>
where
    F: FnMut() -> Result<(), E>,
{
    // Warmup
    for _ in 0..warmup_iters {
        f()?;
    }

    // Measure
    let measure_iters = measure_iters.max(1);
    let mut durations = Vec::with_capacity(measure_iters as usize);
    for _ in 0..measure_iters {
        let start = Instant::now();
        f()?;
        durations.push(start.elapsed());
    }

    durations.sort();
    let min = durations.first().copied().unwrap_or_default();
    let max = durations.last().copied().unwrap_or_default();
    let mid = durations.len() / 2;
    let median = if durations.len() % 2 == 1 {
        durations[mid]
    } else {
        (durations[mid - 1] + durations[mid]) / 2
    };
    let total: Duration = durations.iter().sum();
    let mean = total / measure_iters;

    Ok(BenchmarkResult {
        name: String::new(),
        mean,
        median,
        min,
        max,
        iterations: measure_iters,
    })
}

/// Result of a single benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub name: String,
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub iterations: u32,
}

impl BenchmarkResult {
    /// Create a named result.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mean duration in seconds.
    pub fn mean_seconds(&self) -> f64 {
        self.mean.as_secs_f64()
    }
}
