//! Imputation pipeline shared by the subcommands:
//! CSV ingest -> sample selection -> fit -> predict -> range correction -> merge

use log::{info, warn};

use crate::domain::{ClampMode, ImputeConfig, ModelFile, Prediction, Sample, YearRecord, samples_from};
use crate::error::{AppError, FitError};
use crate::fit::{FitOptions, fit_models, predict_years};
use crate::io::ingest::{IngestedData, load_records};
use crate::math::YearNormalizer;
use crate::models::FittedModels;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub models: FittedModels,
    pub predictions: Vec<Prediction>,
    /// Observed rows plus merged predictions, sorted by year.
    pub completed: Vec<YearRecord>,
}

/// Samples for the two series, years already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSamples {
    pub percentage: Vec<Sample>,
    pub population: Vec<Sample>,
}

/// Load the configured CSV and run the pipeline on it.
pub fn run_impute(config: &ImputeConfig) -> Result<RunOutput, AppError> {
    let ingest = load_records(&config.input)?;
    info!(
        "read {} rows from {} ({} field warnings)",
        ingest.stats.n_records,
        config.input.display(),
        ingest.warnings.len()
    );
    run_with_records(config, ingest)
}

/// Run the pipeline on already-ingested records.
pub fn run_with_records(config: &ImputeConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let normalizer = YearNormalizer::new(config.base_year);
    let samples = select_samples(&ingest.records, &normalizer)?;
    info!(
        "fitting {} family: {} percentage samples, {} population samples",
        config.family.display_name(),
        samples.percentage.len(),
        samples.population.len()
    );

    let opts = FitOptions {
        family: config.family,
        degree_percentage: config.degree_percentage,
        degree_population: config.degree_population,
    };
    let models = fit_models(&samples.percentage, &samples.population, &opts)?;

    let predictions = predict_years(
        &models,
        &config.missing_years,
        &normalizer,
        config.family,
        config.clamp,
    );
    ensure_finite(&predictions)?;

    let completed = merge_predictions(&ingest.records, &predictions);

    Ok(RunOutput {
        ingest,
        models,
        predictions,
        completed,
    })
}

/// Evaluate a saved model file at `years`.
pub fn predict_saved(saved: &ModelFile, years: &[i32], clamp: ClampMode) -> Result<Vec<Prediction>, AppError> {
    let normalizer = YearNormalizer::new(saved.base_year);
    let predictions = predict_years(&saved.models, years, &normalizer, saved.family, clamp);
    ensure_finite(&predictions)?;
    Ok(predictions)
}

/// Fail with exit code 4 if any prediction is NaN or infinite.
pub fn ensure_finite(predictions: &[Prediction]) -> Result<(), AppError> {
    match predictions
        .iter()
        .find(|p| !(p.percentage.is_finite() && p.population.is_finite()))
    {
        Some(p) => Err(AppError::new(4, format!("Non-finite prediction for year {}.", p.year))),
        None => Ok(()),
    }
}

/// Build regression inputs from the dataset.
///
/// - percentage: rows from `base_year` onwards with a positive value
/// - population: every row
pub fn select_samples(records: &[YearRecord], normalizer: &YearNormalizer) -> Result<SeriesSamples, FitError> {
    let (pct_years, pct_values): (Vec<i32>, Vec<f64>) = records
        .iter()
        .filter(|r| r.year >= normalizer.base_year && r.percentage > 0.0)
        .map(|r| (r.year, r.percentage))
        .unzip();
    let (pop_years, pop_values): (Vec<i32>, Vec<f64>) =
        records.iter().map(|r| (r.year, r.population)).unzip();

    Ok(SeriesSamples {
        percentage: samples_from(&normalizer.normalize_all(&pct_years), &pct_values)?,
        population: samples_from(&normalizer.normalize_all(&pop_years), &pop_values)?,
    })
}

/// Append predictions to the observed rows and sort by year.
///
/// Observed rows win: a prediction for a year already present is not merged.
pub fn merge_predictions(records: &[YearRecord], predictions: &[Prediction]) -> Vec<YearRecord> {
    let mut out = records.to_vec();
    for p in predictions {
        if records.iter().any(|r| r.year == p.year) {
            warn!("year {} is already observed; keeping the observed row", p.year);
            continue;
        }
        if out.iter().any(|r| r.year == p.year) {
            continue;
        }
        out.push(YearRecord::from(*p));
    }
    out.sort_by_key(|r| r.year);
    out
}
