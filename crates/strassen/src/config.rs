//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strassen_core::constants::{
    CALIBRATION_CUTOFF_STEP, CALIBRATION_MAX_CUTOFF, CALIBRATION_MIN_CUTOFF, CALIBRATION_SIZES,
    CALIBRATION_TRIALS, DEFAULT_BENCH_SIDE,
};
use strassen_core::DEFAULT_MAX_RANDOM_VALUE;
use strassen_orchestration::OperandFill;

/// Element type of the benchmarked matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElementKind {
    I64,
    F64,
}

/// How operands are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FillKind {
    /// Uniform random integers in `[0, max-value]`.
    Random,
    /// Every entry is one.
    Ones,
}

/// Strassen-rs: conventional, Strassen and hybrid matrix multiplication.
#[derive(Parser, Debug)]
#[command(name = "strassen", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Matrix side(s) to multiply, comma separated. Sides are padded to the
    /// next power of two.
    #[arg(
        short = 'n',
        long = "size",
        value_delimiter = ',',
        default_values_t = [DEFAULT_BENCH_SIDE],
        env = "STRASSEN_SIZE"
    )]
    pub sizes: Vec<usize>,

    /// Algorithm to run: conventional, strassen, hybrid, hybrid:<cutoff> or all.
    #[arg(long, default_value = "all", env = "STRASSEN_ALGO")]
    pub algo: String,

    /// Hybrid cutoff side (0 = calibrated profile, then the default).
    #[arg(long, default_value_t = 0, env = "STRASSEN_CUTOFF")]
    pub cutoff: usize,

    /// Element type.
    #[arg(long, value_enum, default_value_t = ElementKind::I64, env = "STRASSEN_ELEMENT")]
    pub element: ElementKind,

    /// Operand fill.
    #[arg(long, value_enum, default_value_t = FillKind::Random, env = "STRASSEN_FILL")]
    pub fill: FillKind,

    /// Upper bound for random entries.
    #[arg(long, default_value_t = DEFAULT_MAX_RANDOM_VALUE, env = "STRASSEN_MAX_VALUE")]
    pub max_value: u64,

    /// Seed for random operands.
    #[arg(long, env = "STRASSEN_SEED")]
    pub seed: Option<u64>,

    /// Reuse recursion temporaries through a buffer pool.
    #[arg(long, env = "STRASSEN_POOL")]
    pub pool: bool,

    /// Print `originalSize,elapsedSeconds` per run instead of a report.
    #[arg(long)]
    pub csv: bool,

    /// Quiet mode.
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed information.
    #[arg(short, long)]
    pub details: bool,

    /// Print the product (top-left requested region).
    #[arg(short, long)]
    pub print: bool,

    /// Memory limit (e.g., "8G", "512M").
    #[arg(long, default_value = "", env = "STRASSEN_MEMORY_LIMIT")]
    pub memory_limit: String,

    /// Run the full cutoff calibration.
    #[arg(long)]
    pub calibrate: bool,

    /// Run a quick cutoff calibration on one small size.
    #[arg(long)]
    pub quick_calibrate: bool,

    /// Smallest cutoff the calibration tries.
    #[arg(long, default_value_t = CALIBRATION_MIN_CUTOFF)]
    pub min_cutoff: usize,

    /// Largest cutoff the calibration tries.
    #[arg(long, default_value_t = CALIBRATION_MAX_CUTOFF)]
    pub max_cutoff: usize,

    /// Step between tried cutoffs.
    #[arg(long, default_value_t = CALIBRATION_CUTOFF_STEP)]
    pub cutoff_step: usize,

    /// Timed runs averaged per (size, cutoff) pair.
    #[arg(long, default_value_t = CALIBRATION_TRIALS)]
    pub trials: u32,

    /// Sizes the calibration sweeps, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = CALIBRATION_SIZES)]
    pub calibration_sizes: Vec<usize>,

    /// Write calibration samples as CSV (`matrix_size,cutoff,time`).
    #[arg(long)]
    pub calibration_csv: Option<PathBuf>,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Operand fill requested on the command line.
    #[must_use]
    pub fn operand_fill(&self) -> OperandFill {
        match self.fill {
            FillKind::Ones => OperandFill::Ones,
            FillKind::Random => OperandFill::Random {
                max_value: self.max_value,
                seed: self.seed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("strassen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        AppConfig::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.sizes, vec![DEFAULT_BENCH_SIDE]);
        assert_eq!(config.algo, "all");
        assert_eq!(config.cutoff, 0);
        assert_eq!(config.element, ElementKind::I64);
        assert_eq!(config.calibration_sizes, vec![512, 1024, 2048]);
        assert_eq!(
            config.operand_fill(),
            OperandFill::Random {
                max_value: DEFAULT_MAX_RANDOM_VALUE,
                seed: None
            }
        );
    }

    #[test]
    fn size_list_and_fill() {
        let config = parse(&["-n", "3,100,1000", "--fill", "ones", "--element", "f64"]);
        assert_eq!(config.sizes, vec![3, 100, 1000]);
        assert_eq!(config.operand_fill(), OperandFill::Ones);
        assert_eq!(config.element, ElementKind::F64);
    }

    #[test]
    fn rejects_unknown_element() {
        let args = ["strassen", "--element", "u8"];
        assert!(AppConfig::try_parse_from(args).is_err());
    }
}
