//! CLI result presenter.

use std::fmt::Write as _;
use std::time::Duration;

use strassen_core::{Element, Matrix};
use strassen_orchestration::{MultiplyResult, ResultPresenter};

use crate::output::{
    csv_row, format_bytes, format_duration, format_matrix, format_matrix_entries, format_number,
    gflops,
};

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
    print_matrix: bool,
    csv: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            print_matrix: false,
            csv: false,
        }
    }

    /// Also print the (truncated) product.
    #[must_use]
    pub fn with_print_matrix(mut self, print_matrix: bool) -> Self {
        self.print_matrix = print_matrix;
        self
    }

    /// Emit one `originalSize,elapsedSeconds` line per result instead of
    /// the human-readable report.
    #[must_use]
    pub fn with_csv(mut self, csv: bool) -> Self {
        self.csv = csv;
        self
    }

    /// Build the text [`ResultPresenter::present_result`] prints.
    pub fn render_result<T: Element>(
        &self,
        algorithm: &str,
        side: usize,
        result: &Matrix<T>,
        duration: Duration,
        details: bool,
    ) -> String {
        let mut out = String::new();
        if self.csv {
            let _ = writeln!(out, "{}", csv_row(side, duration));
            return out;
        }

        if !self.quiet {
            let _ = writeln!(out, "Algorithm: {algorithm}");
            let _ = writeln!(out, "Size: {side}x{side}");
            let _ = writeln!(out, "Duration: {}", format_duration(duration));

            if details {
                let elements = (side as u64).saturating_mul(side as u64);
                let _ = writeln!(out, "Padded side: {}", result.side());
                let _ = writeln!(out, "Elements: {}", format_number(elements));
                let _ = writeln!(out, "Product storage: {}", format_bytes(result.byte_size()));
                if let Some(rate) = gflops(side, duration) {
                    let _ = writeln!(out, "Rate: {rate:.3} GFLOP/s");
                }
            }
        }

        if self.print_matrix {
            if self.verbose {
                out.push_str(&format_matrix_entries(result, side));
            } else {
                out.push_str(&format_matrix(result, side));
            }
        }
        out
    }

    /// Build the comparison table [`ResultPresenter::present_comparison`] prints.
    pub fn render_comparison<T: Element>(&self, results: &[MultiplyResult<T>]) -> String {
        let mut out = String::new();
        if self.quiet || self.csv {
            return out;
        }

        let _ = writeln!(out, "\nComparison Results:");
        let _ = writeln!(out, "{:-<60}", "");
        for result in results {
            let status = match &result.outcome {
                Ok(_) => "OK".to_string(),
                Err(e) if self.verbose => format!("ERROR: {e}"),
                Err(_) => "ERROR".to_string(),
            };
            let _ = writeln!(
                out,
                "  {:<20} {:>10} [{}]",
                result.algorithm,
                format_duration(result.duration),
                status,
            );
        }
        out
    }
}

impl<T: Element> ResultPresenter<T> for CLIResultPresenter {
    fn present_result(
        &self,
        algorithm: &str,
        side: usize,
        result: &Matrix<T>,
        duration: Duration,
        details: bool,
    ) {
        print!(
            "{}",
            self.render_result(algorithm, side, result, duration, details)
        );
    }

    fn present_comparison(&self, results: &[MultiplyResult<T>]) {
        print!("{}", self.render_comparison(results));
    }

    fn present_error(&self, error: &str) {
        eprintln!("Error: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strassen_core::{MatrixError, MultiplyMode};

    fn product() -> Matrix<i64> {
        let rows = vec![
            vec![19, 22, 0, 0],
            vec![43, 50, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ];
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn normal_report() {
        let presenter = CLIResultPresenter::new(false, false);
        let text =
            presenter.render_result("Strassen", 2, &product(), Duration::from_millis(5), false);
        assert!(text.contains("Algorithm: Strassen"));
        assert!(text.contains("Size: 2x2"));
        assert!(text.contains("Duration: 5.00ms"));
        assert!(!text.contains("Padded side"));
    }

    #[test]
    fn details_report_padding() {
        let presenter = CLIResultPresenter::new(false, false);
        let text = presenter.render_result("Hybrid", 3, &product(), Duration::from_secs(1), true);
        assert!(text.contains("Padded side: 4"));
        assert!(text.contains("Elements: 9"));
        assert!(text.contains("GFLOP/s"));
    }

    #[test]
    fn quiet_prints_nothing_without_matrix() {
        let presenter = CLIResultPresenter::new(false, true);
        let text = presenter.render_result("Strassen", 2, &product(), Duration::ZERO, true);
        assert!(text.is_empty());
    }

    #[test]
    fn print_matrix_truncates_to_requested_side() {
        let presenter = CLIResultPresenter::new(false, true).with_print_matrix(true);
        let text = presenter.render_result("Strassen", 2, &product(), Duration::ZERO, false);
        assert_eq!(text, "  19   22\n  43   50\n");

        let verbose = CLIResultPresenter::new(true, true).with_print_matrix(true);
        let text = verbose.render_result("Strassen", 2, &product(), Duration::ZERO, false);
        assert!(text.starts_with("(0,0):   19\n"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn csv_line_only() {
        let presenter = CLIResultPresenter::new(false, false).with_csv(true);
        let text =
            presenter.render_result("Strassen", 3, &product(), Duration::from_millis(250), true);
        assert_eq!(text, "3,0.250000\n");
    }

    #[test]
    fn comparison_table() {
        let presenter = CLIResultPresenter::new(false, false);
        let results = vec![
            MultiplyResult {
                algorithm: "Conventional".into(),
                mode: MultiplyMode::Conventional,
                outcome: Ok(product()),
                duration: Duration::from_millis(10),
            },
            MultiplyResult {
                algorithm: "Strassen".into(),
                mode: MultiplyMode::Strassen,
                outcome: Err(MatrixError::NotPowerOfTwo(3)),
                duration: Duration::ZERO,
            },
        ];
        let text = presenter.render_comparison(&results);
        assert!(text.contains("Comparison Results:"));
        assert!(text.contains("Conventional"));
        assert!(text.contains("[OK]"));
        assert!(text.contains("[ERROR]"));

        let verbose = CLIResultPresenter::new(true, false);
        assert!(verbose.render_comparison(&results).contains("ERROR: "));

        let quiet = CLIResultPresenter::new(false, true);
        assert!(quiet.render_comparison(&results).is_empty());
    }

    #[test]
    fn present_does_not_panic() {
        let presenter = CLIResultPresenter::new(false, false);
        presenter.present_result("Strassen", 2, &product(), Duration::from_millis(1), true);
        ResultPresenter::<i64>::present_error(&presenter, "test error");
    }
}
