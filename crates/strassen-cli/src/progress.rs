//! Calibration progress bar.

use indicatif::{ProgressBar, ProgressStyle};
use strassen_calibration::calibration::{CalibrationProgress, ProgressCallback};

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta {eta}) {msg}";

/// Progress bar fed by a calibration engine's progress callback.
pub struct CalibrationProgressBar {
    bar: ProgressBar,
}

impl CalibrationProgressBar {
    /// A bar over `total` search steps. Hidden bars swallow all updates.
    #[must_use]
    pub fn new(total: usize, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_length(total as u64);
        Self { bar }
    }

    /// Callback to hand to the calibration engine.
    #[must_use]
    pub fn callback(&self) -> ProgressCallback {
        let bar = self.bar.clone();
        Box::new(move |p: CalibrationProgress| {
            bar.set_length(p.total as u64);
            bar.set_position(p.current as u64);
            bar.set_message(p.step);
        })
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and leave `msg` on the last line.
    pub fn finish(&self, msg: &str) {
        self.bar.finish_with_message(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_moves_bar() {
        let progress = CalibrationProgressBar::new(10, true);
        let cb = progress.callback();
        cb(CalibrationProgress {
            step: "size 512 cutoff 8".into(),
            current: 3,
            total: 10,
        });
        assert_eq!(progress.position(), 3);
        cb(CalibrationProgress {
            step: "size 512 cutoff 12".into(),
            current: 10,
            total: 10,
        });
        assert_eq!(progress.position(), 10);
        progress.finish("done");
    }
}
