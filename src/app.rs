//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - generates synthetic samples
//! - drives the fit engine
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs};
use crate::data::generate_sample;
use crate::domain::SampleConfig;
use crate::engine::controller::parse_coefficient_list;
use crate::engine::{FitController, PolynomialModel};
use crate::error::AppError;

/// Entry point for the `gradfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gradfit` and `gradfit -n 30` to behave like `gradfit tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    if !args.alpha_exp.is_finite() {
        return Err(AppError::new(2, "Learning-rate exponent must be finite."));
    }

    let target = PolynomialModel::try_from_coefficients(parse_coefficient_list(&args.target)?)?;
    let sample_config = SampleConfig {
        count: args.sample_count,
        seed: args.seed,
        noise_sigma: args.noise,
        x_min: -1.0,
        x_max: 1.0,
    };
    let points = generate_sample(&target, &sample_config)?;

    let mut controller = FitController::new(args.degree);
    controller.set_learning_rate_exponent(args.alpha_exp);
    controller.load_points(&points);

    for _ in 0..args.iters {
        if !controller.step() {
            break;
        }
    }

    let snapshot = controller.snapshot();
    print!("{}", crate::report::format_run_summary(&snapshot));

    let residuals = crate::report::compute_residuals(&snapshot);
    let extremes = crate::report::rank_extremes(&residuals, args.top);
    println!();
    print!("{}", crate::report::format_extremes(&extremes));

    if args.plot {
        let plot = crate::plot::render_ascii_plot(&snapshot, args.width, args.height);
        println!("\n{plot}");
    }

    if let Some(path) = &args.export_curve {
        crate::io::write_curve_json(path, &snapshot)?;
        println!("Wrote curve JSON: {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Rewrite argv so `gradfit` defaults to `gradfit tui`.
///
/// Rules:
/// - `gradfit`                     -> `gradfit tui`
/// - `gradfit -n 30 ...`           -> `gradfit tui -n 30 ...`
/// - `gradfit --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
