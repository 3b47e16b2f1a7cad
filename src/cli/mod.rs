//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the engine/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_TICK_MS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gradfit",
    version,
    about = "Polynomial fitting lab (batch gradient descent)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a polynomial to a synthetic sample, print diagnostics, and
    /// optionally plot/export.
    Fit(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI lab.
    ///
    /// Points are toggled on a canvas; iteration runs manually or on an
    /// auto tick, with the same engine `gradfit fit` uses.
    Tui(TuiArgs),
}

/// Options for a scripted fit run.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Degree of the fitting polynomial (clamped to 0..=100).
    #[arg(short = 'd', long, default_value_t = 2)]
    pub degree: usize,

    /// log10 of the learning rate (alpha = 10^exp).
    #[arg(short = 'a', long = "alpha-exp", default_value_t = -1.0, allow_negative_numbers = true)]
    pub alpha_exp: f64,

    /// Number of gradient-descent iterations to run.
    #[arg(short = 'i', long, default_value_t = 500)]
    pub iters: u64,

    /// Target coefficients for the synthetic sample (comma-separated, by
    /// increasing power).
    #[arg(short = 't', long, default_value = "0.2,0.6,-0.9", allow_negative_numbers = true)]
    pub target: String,

    /// Number of synthetic points to generate.
    #[arg(short = 'n', long, default_value_t = 30)]
    pub sample_count: usize,

    /// Random seed for sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Gaussian noise sigma around the target curve.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// How many worst-fit points to list per side.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Render an ASCII plot of the fit.
    #[arg(short = 'p', long)]
    pub plot: bool,

    /// ASCII plot width (characters).
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the fitted curve as JSON.
    #[arg(long)]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting an exported curve file.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Path to a curve JSON written by `gradfit fit --export-curve`.
    pub curve: PathBuf,

    /// ASCII plot width (characters).
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for the interactive TUI.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Initial degree of the fitting polynomial (clamped to 0..=100).
    #[arg(short = 'd', long, default_value_t = 1)]
    pub degree: usize,

    /// Initial log10 of the learning rate.
    #[arg(short = 'a', long = "alpha-exp", default_value_t = 0.0, allow_negative_numbers = true)]
    pub alpha_exp: f64,

    /// Preload a synthetic sample of this size (0 starts empty).
    #[arg(short = 'n', long, default_value_t = 0)]
    pub sample_count: usize,

    /// Random seed for the preloaded sample.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Gaussian noise sigma for the preloaded sample.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Target coefficients for the preloaded sample (comma-separated).
    #[arg(short = 't', long, default_value = "0.2,0.6,-0.9", allow_negative_numbers = true)]
    pub target: String,

    /// Auto-iteration tick interval in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,
}
