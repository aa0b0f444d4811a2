//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs the imputation pipeline
//! - prints reports/plots
//! - writes the completed CSV and optional model JSON

use clap::Parser;
use env_logger::{Builder, Env};
use log::{LevelFilter, info};

use crate::cli::{Command, ImputeArgs, PredictArgs};
use crate::domain::{ImputeConfig, Series};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gapfill` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Impute(args) => handle_impute(args, OutputMode::Full),
        Command::Fit(args) => handle_impute(args, OutputMode::ModelsOnly),
        Command::Predict(args) => handle_predict(args),
    }
}

fn init_logging(verbose: u8) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        _ => {
            builder.filter_level(LevelFilter::Debug);
        }
    }
    // A logger may already be installed when embedded; that one wins.
    let _ = builder.format_target(false).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ModelsOnly,
}

fn handle_impute(args: ImputeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = impute_config_from_args(&args);
    config.validate()?;
    let run = pipeline::run_impute(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, config.family, &run.models, config.base_year)
    );

    if mode == OutputMode::ModelsOnly {
        return Ok(());
    }

    println!("{}", crate::report::format_predictions(&run.predictions));

    if config.plot {
        for series in Series::ALL {
            let model = run.models.for_series(series);
            let plot = crate::plot::render_series_plot(
                series,
                &run.ingest.records,
                &run.predictions,
                model,
                config.base_year,
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
    }

    crate::io::export::write_completed_csv(&config.output, &run.completed)?;
    println!("Completed dataset written to '{}'", config.output.display());
    info!("wrote {} rows to {}", run.completed.len(), config.output.display());

    if let Some(path) = &config.export_model {
        let file = crate::io::model::build_model_file(&config, &run.models, &run.predictions);
        crate::io::model::write_model_json(path, &file)?;
        println!("Model written to '{}'", path.display());
    }

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let saved = crate::io::model::read_model_json(&args.model)?;
    let predictions = pipeline::predict_saved(&saved, &args.years, args.clamp)?;
    println!("{}", crate::report::format_predictions(&predictions));
    Ok(())
}

pub fn impute_config_from_args(args: &ImputeArgs) -> ImputeConfig {
    ImputeConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        family: args.family,
        base_year: args.base_year,
        degree_percentage: args.degree_percentage,
        degree_population: args.degree_population,
        missing_years: args.missing.clone(),
        clamp: args.clamp,
        export_model: args.export_model.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}
