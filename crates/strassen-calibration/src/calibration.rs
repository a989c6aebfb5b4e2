//! Calibration engine.

use tracing::{info, warn};

use crate::error::CalibrationError;
use crate::io;
use crate::profile::CalibrationProfile;
use crate::search::{CutoffSample, CutoffSearch};

/// Side used by quick calibration.
const QUICK_SIZE: usize = 256;

/// Mode of calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    /// Full calibration: the configured cutoff search.
    Full,
    /// Quick calibration: one small size, one trial per cutoff.
    Quick,
    /// Cached: load from profile file.
    Cached,
}

/// Progress callback for calibration.
pub type ProgressCallback = Box<dyn Fn(CalibrationProgress) + Send>;

/// Progress information during calibration.
#[derive(Debug, Clone)]
pub struct CalibrationProgress {
    /// Current step name.
    pub step: String,
    /// Current step number (1-based).
    pub current: usize,
    /// Total number of steps.
    pub total: usize,
}

/// Calibration engine that determines the hybrid cutoff.
pub struct CalibrationEngine {
    mode: CalibrationMode,
    search: CutoffSearch,
    progress_cb: Option<ProgressCallback>,
}

impl CalibrationEngine {
    /// Create a new calibration engine with the default search ranges.
    #[must_use]
    pub fn new(mode: CalibrationMode) -> Self {
        Self {
            mode,
            search: CutoffSearch::default(),
            progress_cb: None,
        }
    }

    /// Replace the search configuration.
    #[must_use]
    pub fn with_search(mut self, search: CutoffSearch) -> Self {
        self.search = search;
        self
    }

    /// Set a progress callback.
    #[must_use]
    pub fn with_progress(mut self, cb: ProgressCallback) -> Self {
        self.progress_cb = Some(cb);
        self
    }

    /// Search this engine runs in its mode. `Cached` never searches and
    /// reports the configured one.
    pub fn effective_search(&self) -> CutoffSearch {
        match self.mode {
            CalibrationMode::Full | CalibrationMode::Cached => self.search.clone(),
            CalibrationMode::Quick => CutoffSearch {
                sizes: vec![QUICK_SIZE],
                trials: 1,
                ..self.search.clone()
            },
        }
    }

    /// Run calibration and produce a profile.
    pub fn calibrate(&self) -> Result<CalibrationProfile, CalibrationError> {
        match self.mode {
            CalibrationMode::Full | CalibrationMode::Quick => self.run_search(),
            CalibrationMode::Cached => Ok(self.load_cached()),
        }
    }

    fn report_progress(&self, sample: &CutoffSample, current: usize, total: usize) {
        if let Some(cb) = &self.progress_cb {
            cb(CalibrationProgress {
                step: format!("size {} cutoff {}", sample.size, sample.cutoff),
                current,
                total,
            });
        }
    }

    fn run_search(&self) -> Result<CalibrationProfile, CalibrationError> {
        let search = self.effective_search();
        let total = search.total_steps();
        info!(mode = ?self.mode, sizes = ?search.sizes, steps = total, "calibrating hybrid cutoff");

        let report = search.run(|done, sample| self.report_progress(sample, done, total))?;
        let profile = CalibrationProfile::from_report(&report);
        info!(cutoff = profile.cutoff, "calibration finished");
        Ok(profile)
    }

    #[allow(clippy::unused_self)]
    fn load_cached(&self) -> CalibrationProfile {
        io::load_validated_profile().unwrap_or_else(|| {
            warn!("no usable cached profile, using defaults");
            CalibrationProfile::default()
        })
    }
}
