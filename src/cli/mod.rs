//! Command-line parsing for the yearly-series imputer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code. Every fitting option can also come from the
//! environment (or a `.env` file loaded at startup).

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{ClampMode, DEFAULT_MISSING_YEARS, FitFamily};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gapfill", version, about = "Impute missing yearly observations by curve fitting")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` also works.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit both series, print models and predictions, and write the completed CSV.
    Impute(ImputeArgs),
    /// Fit both series and print the model equations only.
    Fit(ImputeArgs),
    /// Evaluate a previously exported model JSON at the given years.
    Predict(PredictArgs),
}

/// Common options for fitting and imputing.
#[derive(Debug, Parser, Clone)]
pub struct ImputeArgs {
    /// Input CSV (`year,percentage,population` with a header row).
    #[arg(short, long, env = "GAPFILL_INPUT", default_value = "data.csv")]
    pub input: PathBuf,

    /// Output CSV for the completed dataset.
    #[arg(short, long, env = "GAPFILL_OUTPUT", default_value = "completed.csv")]
    pub output: PathBuf,

    /// Curve family: exponential (+ linear population) or polynomial.
    #[arg(long, value_enum, env = "GAPFILL_FAMILY", default_value_t = FitFamily::Exponential)]
    pub family: FitFamily,

    /// Year subtracted from every year before fitting.
    #[arg(long, env = "GAPFILL_BASE_YEAR", default_value_t = 2000)]
    pub base_year: i32,

    /// Polynomial degree for the percentage series.
    #[arg(long, env = "GAPFILL_DEGREE_PERCENTAGE", default_value_t = 3)]
    pub degree_percentage: usize,

    /// Polynomial degree for the population series.
    #[arg(long, env = "GAPFILL_DEGREE_POPULATION", default_value_t = 2)]
    pub degree_population: usize,

    /// Years to impute (comma-separated).
    #[arg(
        long,
        env = "GAPFILL_MISSING",
        value_delimiter = ',',
        default_values_t = DEFAULT_MISSING_YEARS
    )]
    pub missing: Vec<i32>,

    /// Which predictions get the [0, 100] / >= 0 range correction.
    #[arg(long, value_enum, env = "GAPFILL_CLAMP", default_value_t = ClampMode::Polynomial)]
    pub clamp: ClampMode,

    /// Export the fitted models (and predictions) to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,

    /// Render an ASCII plot of each series.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

/// Options for evaluating a saved model.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// Model JSON produced by `gapfill impute --export-model`.
    #[arg(long, value_name = "JSON")]
    pub model: PathBuf,

    /// Years to evaluate (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub years: Vec<i32>,

    /// Which predictions get the range correction.
    #[arg(long, value_enum, default_value_t = ClampMode::Polynomial)]
    pub clamp: ClampMode,
}
