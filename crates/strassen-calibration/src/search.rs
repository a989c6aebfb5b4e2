//! Hybrid cutoff search.
//!
//! For each matrix size, every candidate cutoff is timed over a few trials
//! and averaged. The fastest cutoff per size is that size's optimum; the
//! recommendation is the integer mean of the optima.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::info;

use strassen_core::constants::{
    CALIBRATION_CUTOFF_STEP, CALIBRATION_MAX_CUTOFF, CALIBRATION_MIN_CUTOFF, CALIBRATION_SIZES,
    CALIBRATION_TRIALS,
};
use strassen_core::{next_power_of_two, MultiplyMode, DEFAULT_MAX_RANDOM_VALUE};

use crate::error::CalibrationError;
use crate::microbench::{operands, time_mode_on};

/// Mean time of one (size, cutoff) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffSample {
    /// Padded matrix side.
    pub size: usize,
    pub cutoff: usize,
    /// Mean wall-clock seconds over the trials.
    pub mean_seconds: f64,
}

/// Fastest cutoff for one size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeOptimum {
    pub size: usize,
    pub cutoff: usize,
    pub mean_seconds: f64,
}

/// Search configuration.
#[derive(Debug, Clone)]
pub struct CutoffSearch {
    /// Matrix sides to time (padded to powers of two).
    pub sizes: Vec<usize>,
    pub min_cutoff: usize,
    pub max_cutoff: usize,
    pub step: usize,
    /// Timed runs averaged per pair.
    pub trials: u32,
    /// Upper bound for random operand entries.
    pub max_value: u64,
    /// Operand seed, for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for CutoffSearch {
    fn default() -> Self {
        Self {
            sizes: CALIBRATION_SIZES.to_vec(),
            min_cutoff: CALIBRATION_MIN_CUTOFF,
            max_cutoff: CALIBRATION_MAX_CUTOFF,
            step: CALIBRATION_CUTOFF_STEP,
            trials: CALIBRATION_TRIALS,
            max_value: DEFAULT_MAX_RANDOM_VALUE,
            seed: None,
        }
    }
}

impl CutoffSearch {
    /// Check the ranges.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.sizes.is_empty() {
            return Err(CalibrationError::InvalidRange("no sizes".into()));
        }
        if self.sizes.contains(&0) {
            return Err(CalibrationError::InvalidRange("size 0".into()));
        }
        if self.min_cutoff == 0 {
            return Err(CalibrationError::InvalidRange("minimum cutoff is 0".into()));
        }
        if self.min_cutoff > self.max_cutoff {
            return Err(CalibrationError::InvalidRange(format!(
                "minimum cutoff {} above maximum {}",
                self.min_cutoff, self.max_cutoff
            )));
        }
        if self.step == 0 {
            return Err(CalibrationError::InvalidRange("cutoff step is 0".into()));
        }
        if self.trials == 0 {
            return Err(CalibrationError::InvalidRange("trials is 0".into()));
        }
        Ok(())
    }

    /// Candidate cutoffs, ascending.
    pub fn cutoffs(&self) -> Vec<usize> {
        (self.min_cutoff..=self.max_cutoff)
            .step_by(self.step.max(1))
            .collect()
    }

    /// Number of (size, cutoff) pairs the search will time.
    pub fn total_steps(&self) -> usize {
        self.sizes.len() * self.cutoffs().len()
    }

    /// Run the search. `progress` is called after each timed pair with the
    /// number of pairs done so far.
    pub fn run(
        &self,
        mut progress: impl FnMut(usize, &CutoffSample),
    ) -> Result<SearchReport, CalibrationError> {
        self.validate()?;
        let cutoffs = self.cutoffs();
        let mut samples = Vec::with_capacity(self.total_steps());

        for &requested in &self.sizes {
            let size = next_power_of_two(requested);
            let (a, b) = operands(size, self.max_value, self.seed)?;
            for &cutoff in &cutoffs {
                let result = time_mode_on(&a, &b, MultiplyMode::Hybrid { cutoff }, self.trials)?;
                let sample = CutoffSample {
                    size,
                    cutoff,
                    mean_seconds: result.mean_seconds(),
                };
                info!(size, cutoff, seconds = sample.mean_seconds, "timed cutoff");
                samples.push(sample);
                progress(samples.len(), &sample);
            }
        }

        let report = SearchReport { samples };
        if let Some(cutoff) = report.recommended_cutoff() {
            info!(cutoff, "recommended hybrid cutoff");
        }
        Ok(report)
    }
}

/// Timings collected by a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub samples: Vec<CutoffSample>,
}

impl SearchReport {
    /// Fastest cutoff per size, in the order sizes first appear. Ties keep
    /// the smaller cutoff.
    pub fn optimal_cutoffs(&self) -> Vec<SizeOptimum> {
        let mut optima: Vec<SizeOptimum> = Vec::new();
        for s in &self.samples {
            match optima.iter_mut().find(|o| o.size == s.size) {
                Some(best) => {
                    if s.mean_seconds < best.mean_seconds {
                        best.cutoff = s.cutoff;
                        best.mean_seconds = s.mean_seconds;
                    }
                }
                None => optima.push(SizeOptimum {
                    size: s.size,
                    cutoff: s.cutoff,
                    mean_seconds: s.mean_seconds,
                }),
            }
        }
        optima
    }

    /// Integer (floor) mean of the per-size optimal cutoffs.
    pub fn recommended_cutoff(&self) -> Option<usize> {
        let optima = self.optimal_cutoffs();
        if optima.is_empty() {
            return None;
        }
        let sum: usize = optima.iter().map(|o| o.cutoff).sum();
        Some(sum / optima.len())
    }

    /// Write the samples as CSV with a `matrix_size,cutoff,time` header.
    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "matrix_size,cutoff,time")?;
        for s in &self.samples {
            writeln!(out, "{},{},{}", s.size, s.cutoff, s.mean_seconds)?;
        }
        Ok(())
    }
}
