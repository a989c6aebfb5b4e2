//! Profile persistence (load/save) and CSV export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::CalibrationError;
use crate::profile::{self, CalibrationProfile};
use crate::search::SearchReport;

const PROFILE_FILENAME: &str = "strassen_calibration.json";
const CONFIG_DIR_NAME: &str = "strassen";

/// Load calibration profile from the standard location.
/// Tries XDG config dir first, then the working directory.
#[must_use]
pub fn load_profile() -> Option<CalibrationProfile> {
    // Try XDG config directory first
    if let Some(path) = xdg_profile_path() {
        if path.exists() {
            if let Some(p) = load_from_path(&path) {
                return Some(p);
            }
        }
    }

    // Fall back to working directory
    let path = cwd_profile_path();
    if path.exists() {
        return load_from_path(&path);
    }

    None
}

/// Load a profile and validate it against the current environment.
/// Returns `None` if the profile is missing, incompatible, invalid, or for a
/// different CPU.
pub fn load_validated_profile() -> Option<CalibrationProfile> {
    validate(load_profile()?)
}

/// [`load_validated_profile`] for an explicit path.
pub fn load_validated_from_path(path: &Path) -> Option<CalibrationProfile> {
    validate(load_from_path(path)?)
}

fn validate(p: CalibrationProfile) -> Option<CalibrationProfile> {
    if !p.is_compatible() {
        warn!(version = p.version, "profile version mismatch, ignoring cached profile");
        return None;
    }
    if !p.is_valid() {
        warn!(cutoff = p.cutoff, "profile has invalid cutoffs, ignoring cached profile");
        return None;
    }

    let current_fp = profile::cpu_fingerprint();
    if !p.matches_cpu(&current_fp) {
        warn!(
            saved = %p.cpu_fingerprint,
            current = %current_fp,
            "profile CPU mismatch, ignoring cached profile"
        );
        return None;
    }

    Some(p)
}

/// Save calibration profile to the XDG config directory.
/// Falls back to the working directory if no config dir is known.
/// Returns the path written.
pub fn save_profile(p: &CalibrationProfile) -> Result<PathBuf, CalibrationError> {
    let path = if let Some(xdg_path) = xdg_profile_path() {
        // Ensure the config directory exists
        if let Some(parent) = xdg_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        xdg_path
    } else {
        cwd_profile_path()
    };

    save_to_path(p, &path)?;
    Ok(path)
}

/// Save profile to a specific path.
pub fn save_to_path(p: &CalibrationProfile, path: &Path) -> Result<(), CalibrationError> {
    let content = serde_json::to_string_pretty(p)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Write search samples as CSV (`matrix_size,cutoff,time`).
pub fn export_csv(report: &SearchReport, path: &Path) -> Result<(), CalibrationError> {
    let mut out = BufWriter::new(File::create(path)?);
    report.write_csv(&mut out)?;
    out.flush()?;
    Ok(())
}

fn load_from_path(path: &Path) -> Option<CalibrationProfile> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Get the XDG config directory path for the profile.
fn xdg_profile_path() -> Option<PathBuf> {
    // Try XDG_CONFIG_HOME, fall back to ~/.config
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_dir.join(CONFIG_DIR_NAME).join(PROFILE_FILENAME))
}

/// Get the working directory profile path.
fn cwd_profile_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!(".{PROFILE_FILENAME}"))
}
