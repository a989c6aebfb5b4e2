//! Calibration profile (serializable).

use serde::{Deserialize, Serialize};

use strassen_core::DEFAULT_HYBRID_CUTOFF;

use crate::search::{CutoffSample, SearchReport, SizeOptimum};

/// Current profile format version.
pub const PROFILE_VERSION: u32 = 1;

/// Calibration profile holding the recommended hybrid cutoff and the
/// measurements it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Profile format version for compatibility checking.
    pub version: u32,
    /// Recommended hybrid cutoff.
    pub cutoff: usize,
    /// Fastest cutoff per matrix size.
    #[serde(default)]
    pub optima: Vec<SizeOptimum>,
    /// Raw timings.
    #[serde(default)]
    pub samples: Vec<CutoffSample>,
    /// CPU model used for calibration.
    pub cpu_model: String,
    /// Number of CPU cores.
    pub num_cores: usize,
    /// CPU fingerprint for invalidation.
    pub cpu_fingerprint: String,
    /// Calibration timestamp (seconds since the Unix epoch, `unix:` prefix).
    pub timestamp: String,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            cutoff: DEFAULT_HYBRID_CUTOFF,
            optima: Vec::new(),
            samples: Vec::new(),
            cpu_model: String::new(),
            num_cores: num_cpus(),
            cpu_fingerprint: String::new(),
            timestamp: String::new(),
        }
    }
}

impl CalibrationProfile {
    /// Build a profile for this machine from a finished search.
    ///
    /// Falls back to the default cutoff when the report is empty.
    #[must_use]
    pub fn from_report(report: &SearchReport) -> Self {
        Self {
            version: PROFILE_VERSION,
            cutoff: report.recommended_cutoff().unwrap_or(DEFAULT_HYBRID_CUTOFF),
            optima: report.optimal_cutoffs(),
            samples: report.samples.clone(),
            cpu_model: cpu_model(),
            num_cores: num_cpus(),
            cpu_fingerprint: cpu_fingerprint(),
            timestamp: current_timestamp(),
        }
    }

    /// Check if this profile is compatible with the current version.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == PROFILE_VERSION
    }

    /// Check if this profile matches the current CPU.
    #[must_use]
    pub fn matches_cpu(&self, current_fingerprint: &str) -> bool {
        if self.cpu_fingerprint.is_empty() || current_fingerprint.is_empty() {
            return true; // can't verify, assume compatible
        }
        self.cpu_fingerprint == current_fingerprint
    }

    /// Validate that the cutoffs are usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.cutoff > 0 && self.optima.iter().all(|o| o.cutoff > 0 && o.size > 0)
    }

    /// The measurements as a report, for CSV export.
    pub fn report(&self) -> SearchReport {
        SearchReport {
            samples: self.samples.clone(),
        }
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}

/// Get a CPU fingerprint based on model and core count.
#[must_use]
pub fn cpu_fingerprint() -> String {
    let cores = num_cpus();
    let model = cpu_model();
    if model.is_empty() {
        format!("cores={cores}")
    } else {
        format!("cores={cores};model={model}")
    }
}

/// Get the current CPU model string.
#[must_use]
pub fn cpu_model() -> String {
    use sysinfo::System;
    let sys = System::new_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default()
}

/// Get the current timestamp as `unix:<seconds>`.
#[must_use]
pub fn current_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("unix:{}", dur.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SearchReport {
        SearchReport {
            samples: vec![
                CutoffSample {
                    size: 512,
                    cutoff: 8,
                    mean_seconds: 0.4,
                },
                CutoffSample {
                    size: 512,
                    cutoff: 16,
                    mean_seconds: 0.3,
                },
                CutoffSample {
                    size: 1024,
                    cutoff: 32,
                    mean_seconds: 2.0,
                },
            ],
        }
    }

    #[test]
    fn profile_serialization() {
        let profile = CalibrationProfile::from_report(&report());
        let json = serde_json::to_string_pretty(&profile).unwrap();
        let deserialized: CalibrationProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.cutoff, profile.cutoff);
        assert_eq!(deserialized.optima, profile.optima);
        assert_eq!(deserialized.version, PROFILE_VERSION);
    }

    #[test]
    fn from_report_recommends_mean_of_optima() {
        let profile = CalibrationProfile::from_report(&report());
        assert_eq!(profile.cutoff, 24);
        assert_eq!(profile.optima.len(), 2);
        assert_eq!(profile.samples.len(), 3);
        assert!(profile.timestamp.starts_with("unix:"));
        assert!(profile.is_valid());
        assert_eq!(profile.report(), report());
    }

    #[test]
    fn empty_report_uses_default_cutoff() {
        let profile = CalibrationProfile::from_report(&SearchReport::default());
        assert_eq!(profile.cutoff, DEFAULT_HYBRID_CUTOFF);
    }

    #[test]
    fn older_profiles_without_samples_load() {
        let json = r#"{
            "version": 1,
            "cutoff": 32,
            "cpu_model": "",
            "num_cores": 4,
            "cpu_fingerprint": "",
            "timestamp": ""
        }"#;
        let p: CalibrationProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.cutoff, 32);
        assert!(p.samples.is_empty());
    }

    #[test]
    fn profile_compatibility() {
        let profile = CalibrationProfile::default();
        assert!(profile.is_compatible());

        let old = CalibrationProfile {
            version: 0,
            ..Default::default()
        };
        assert!(!old.is_compatible());
    }

    #[test]
    fn profile_cpu_match() {
        let mut profile = CalibrationProfile {
            cpu_fingerprint: "cores=8".to_string(),
            ..Default::default()
        };
        assert!(profile.matches_cpu("cores=8"));
        assert!(!profile.matches_cpu("cores=4"));
        // Empty fingerprint should match anything
        profile.cpu_fingerprint = String::new();
        assert!(profile.matches_cpu("cores=8"));
    }

    #[test]
    fn profile_validation() {
        assert!(CalibrationProfile::default().is_valid());

        let bad = CalibrationProfile {
            cutoff: 0,
            ..Default::default()
        };
        assert!(!bad.is_valid());
    }

    #[test]
    fn cpu_fingerprint_nonempty() {
        let fp = cpu_fingerprint();
        assert!(fp.starts_with("cores="));
    }
}
