//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use strassen_calibration::{io as profile_io, CalibrationEngine, CalibrationMode, CutoffSearch};
use strassen_cli::output::format_bytes;
use strassen_cli::presenter::CLIResultPresenter;
use strassen_cli::progress::CalibrationProgressBar;
use strassen_cli::ui;
use strassen_core::memory_budget::{parse_memory_limit, MemoryEstimate};
use strassen_core::sizing::checked_next_power_of_two;
use strassen_core::{DefaultFactory, Element, MatrixError, Multiplier, Options};
use strassen_orchestration::{
    analyze_comparison_results, build_operands, execute_multiplications, get_multipliers_to_run,
    ResultPresenter,
};

use crate::config::{AppConfig, ElementKind};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        strassen_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    // Handle calibration
    if config.calibrate || config.quick_calibrate {
        return run_calibration(config);
    }

    match config.element {
        ElementKind::I64 => run_cli::<i64>(config),
        ElementKind::F64 => run_cli::<f64>(config),
    }
}

/// Options for this run. A zero `--cutoff` falls back to a valid cached
/// calibration profile, then to the built-in default.
pub fn build_options(config: &AppConfig) -> Result<Options> {
    let memory_limit = parse_memory_limit(&config.memory_limit).map_err(MatrixError::Config)?;
    let cutoff = if config.cutoff > 0 {
        config.cutoff
    } else {
        profile_io::load_validated_profile().map_or(0, |p| p.cutoff)
    };
    Ok(Options {
        cutoff,
        max_value: config.max_value,
        memory_limit,
        use_pool: config.pool,
    }
    .normalize())
}

fn run_cli<T: Element>(config: &AppConfig) -> Result<()> {
    let factory: DefaultFactory<T> = DefaultFactory::with_options(build_options(config)?);
    let opts = factory.options();
    info!(cutoff = opts.cutoff, pool = opts.use_pool, "options resolved");

    let multipliers = get_multipliers_to_run(&config.algo, &factory)?;
    if config.csv && config.print {
        ui::print_warning("--print is ignored with --csv");
    }
    let presenter = CLIResultPresenter::new(config.verbose, config.quiet)
        .with_print_matrix(config.print)
        .with_csv(config.csv);

    for &side in &config.sizes {
        // Memory budget check, before any operand exists
        let padded = checked_next_power_of_two(side).ok_or(MatrixError::Allocation { side })?;
        check_memory_budget::<T>(padded, &multipliers, opts.memory_limit())?;

        let (a, b) = build_operands::<T>(side, config.operand_fill())
            .with_context(|| format!("preparing {side}x{side} operands"))?;

        let results = execute_multiplications(&multipliers, &a, &b);

        // Present results
        for result in &results {
            match &result.outcome {
                Ok(product) => presenter.present_result(
                    &result.algorithm,
                    side,
                    product,
                    result.duration,
                    config.details,
                ),
                Err(e) => ResultPresenter::<T>::present_error(
                    &presenter,
                    &format!("{}: {e}", result.algorithm),
                ),
            }
        }

        // Analyze results
        if results.len() > 1 {
            presenter.present_comparison(&results);
            analyze_comparison_results(&results)
                .with_context(|| format!("cross-check at size {side}"))?;
        }
        if let Some(err) = results.iter().find_map(|r| r.outcome.as_ref().err()) {
            return Err(err.clone()).with_context(|| format!("multiplying at size {side}"));
        }
    }

    Ok(())
}

/// Refuse a run whose estimated peak exceeds `limit`.
///
/// Every product stays alive until the cross-check, so each multiplier is
/// charged its own estimate plus the outputs of the other runs.
pub fn check_memory_budget<T: Element>(
    padded: usize,
    multipliers: &[Arc<dyn Multiplier<T>>],
    limit: Option<usize>,
) -> Result<(), MatrixError> {
    let Some(limit) = limit else {
        return Ok(());
    };
    let element_bytes = std::mem::size_of::<T>();
    let product_bytes = padded.saturating_mul(padded).saturating_mul(element_bytes);
    let retained = product_bytes.saturating_mul(multipliers.len().saturating_sub(1));

    for m in multipliers {
        let estimate = MemoryEstimate::estimate(padded, m.mode(), element_bytes);
        let peak = estimate.total_bytes.saturating_add(retained);
        if peak > limit {
            return Err(MatrixError::Config(format!(
                "{} at side {padded} needs an estimated {}, limit is {}",
                m.name(),
                format_bytes(peak),
                format_bytes(limit)
            )));
        }
    }
    Ok(())
}

fn run_calibration(config: &AppConfig) -> Result<()> {
    let mode = if config.calibrate {
        CalibrationMode::Full
    } else {
        CalibrationMode::Quick
    };
    let search = CutoffSearch {
        sizes: config.calibration_sizes.clone(),
        min_cutoff: config.min_cutoff,
        max_cutoff: config.max_cutoff,
        step: config.cutoff_step,
        trials: config.trials,
        max_value: config.max_value,
        seed: config.seed,
    };

    let engine = CalibrationEngine::new(mode).with_search(search);
    let total = engine.effective_search().total_steps();
    let bar = CalibrationProgressBar::new(total, config.quiet);
    let engine = engine.with_progress(bar.callback());

    let profile = engine.calibrate()?;
    bar.finish("calibration complete");

    if !config.quiet {
        ui::print_header("Calibration");
        for optimum in &profile.optima {
            println!(
                "  size {:>6}: cutoff {:>4} ({:.6}s)",
                optimum.size, optimum.cutoff, optimum.mean_seconds
            );
        }
        println!("  Recommended cutoff: {}", profile.cutoff);
    }

    if let Some(path) = &config.calibration_csv {
        profile_io::export_csv(&profile.report(), path)?;
        if !config.quiet {
            ui::print_success(&format!("samples written to {}", path.display()));
        }
    }

    let saved = profile_io::save_profile(&profile)?;
    if !config.quiet {
        ui::print_success(&format!("profile saved to {}", saved.display()));
    }
    Ok(())
}
