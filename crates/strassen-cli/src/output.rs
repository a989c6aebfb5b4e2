//! CLI output formatting.

use std::fmt::Write as _;
use std::time::Duration;

use strassen_core::{Element, Matrix};

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a byte count with a binary unit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// One `originalSize,elapsedSeconds` row, seconds with six decimals.
#[must_use]
pub fn csv_row(side: usize, elapsed: Duration) -> String {
    format!("{side},{:.6}", elapsed.as_secs_f64())
}

/// Arithmetic rate of a conventional-equivalent product (2n³ operations)
/// in GFLOP/s. `None` for a zero duration.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gflops(side: usize, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return None;
    }
    let n = side as f64;
    Some(2.0 * n * n * n / secs / 1e9)
}

/// Render the top-left `side x side` region of `m` as an aligned grid.
#[must_use]
pub fn format_matrix<T: Element>(m: &Matrix<T>, side: usize) -> String {
    let side = side.min(m.side());
    let mut out = String::new();
    for i in 0..side {
        for (j, x) in m.row(i)[..side].iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{x:>4}");
        }
        out.push('\n');
    }
    out
}

/// Render the top-left region one entry per line as `(row,col): value`.
#[must_use]
pub fn format_matrix_entries<T: Element>(m: &Matrix<T>, side: usize) -> String {
    let side = side.min(m.side());
    let mut out = String::new();
    for i in 0..side {
        for j in 0..side {
            let _ = writeln!(out, "({i},{j}): {:>4}", m.get(i, j));
        }
    }
    out
}
