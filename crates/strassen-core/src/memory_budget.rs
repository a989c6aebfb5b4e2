//! Memory budget estimation and validation.

use crate::mode::MultiplyMode;
use crate::sizing::recursion_sides;

/// Memory estimate for one multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEstimate {
    /// Bytes for the two operands and the result.
    pub operand_bytes: usize,
    /// Peak bytes held by recursion temporaries.
    pub temp_bytes: usize,
    /// Total estimated memory (in bytes).
    pub total_bytes: usize,
}

impl MemoryEstimate {
    /// Estimate memory for multiplying two `side x side` matrices in `mode`.
    ///
    /// Temporaries of every frame on the deepest path are live at once: three
    /// `(s/2)²` matrices for each side `s` that still recurses.
    #[must_use]
    pub fn estimate(side: usize, mode: MultiplyMode, element_bytes: usize) -> Self {
        let matrix_bytes = |s: usize| s.saturating_mul(s).saturating_mul(element_bytes);
        let operand_bytes = matrix_bytes(side).saturating_mul(3);

        let temp_bytes = match mode.base_case() {
            None => 0,
            Some(base) => recursion_sides(side, base.cutoff())
                .into_iter()
                .filter(|&s| !base.is_reached(s))
                .map(|s| matrix_bytes(s / 2).saturating_mul(3))
                .fold(0usize, usize::saturating_add),
        };

        Self {
            operand_bytes,
            temp_bytes,
            total_bytes: operand_bytes.saturating_add(temp_bytes),
        }
    }

    /// Check if the multiplication fits within the given memory limit.
    ///
    /// `None` means unlimited (always fits).
    #[must_use]
    pub fn fits_in(&self, limit: Option<usize>) -> bool {
        match limit {
            None => true,
            Some(l) => self.total_bytes <= l,
        }
    }
}

/// Parse a memory limit string (e.g., "8G", "512M", "1024K").
///
/// # Errors
///
/// Returns an error string if the format is invalid or the number cannot be parsed.
pub fn parse_memory_limit(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory limit: {e}"))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("memory limit too large: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_needs_no_temporaries() {
        let est = MemoryEstimate::estimate(4, MultiplyMode::Conventional, 8);
        assert_eq!(est.operand_bytes, 3 * 16 * 8);
        assert_eq!(est.temp_bytes, 0);
        assert_eq!(est.total_bytes, est.operand_bytes);
    }

    #[test]
    fn strassen_sums_every_level() {
        // Frames at sides 4 and 2: 3*(2*2) + 3*(1*1) elements.
        let est = MemoryEstimate::estimate(4, MultiplyMode::Strassen, 8);
        assert_eq!(est.temp_bytes, (3 * 4 + 3) * 8);
    }

    #[test]
    fn hybrid_stops_at_cutoff() {
        // Frames at 16 and 8 only.
        let est = MemoryEstimate::estimate(16, MultiplyMode::Hybrid { cutoff: 4 }, 4);
        assert_eq!(est.temp_bytes, (3 * 64 + 3 * 16) * 4);

        let flat = MemoryEstimate::estimate(16, MultiplyMode::Hybrid { cutoff: 16 }, 4);
        assert_eq!(flat.temp_bytes, 0);
    }

    #[test]
    fn fits_in_limits() {
        let est = MemoryEstimate::estimate(1024, MultiplyMode::Strassen, 8);
        assert!(est.fits_in(None));
        assert!(est.fits_in(Some(est.total_bytes)));
        assert!(!est.fits_in(Some(est.total_bytes - 1)));
    }

    #[test]
    fn huge_sides_saturate() {
        let est = MemoryEstimate::estimate(usize::MAX, MultiplyMode::Strassen, 8);
        assert_eq!(est.total_bytes, usize::MAX);
        assert!(!est.fits_in(Some(1 << 40)));
    }

    #[test]
    fn parse_memory_limit_values() {
        assert_eq!(parse_memory_limit("8G").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_memory_limit("512M").unwrap(), 512 * 1024 * 1024);
        assert_eq!(parse_memory_limit("1024K").unwrap(), 1024 * 1024);
        assert_eq!(parse_memory_limit("100B").unwrap(), 100);
        assert_eq!(parse_memory_limit("").unwrap(), 0);
    }

    #[test]
    fn parse_memory_limit_invalid() {
        assert!(parse_memory_limit("abc").is_err());
        assert!(parse_memory_limit("99999999999999999999G").is_err());
    }
}
