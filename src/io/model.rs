//! Read/write model JSON files.
//!
//! Model JSON is the "portable" representation of a fit run:
//! - the fitted model for each series (family + coefficients)
//! - the normalization anchor needed to evaluate them
//! - the predictions that were imputed
//!
//! The schema is defined by `domain::ModelFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{ImputeConfig, ModelFile, Prediction};
use crate::error::AppError;
use crate::models::FittedModels;

/// Assemble the model file for a finished run.
pub fn build_model_file(config: &ImputeConfig, models: &FittedModels, predictions: &[Prediction]) -> ModelFile {
    ModelFile {
        tool: "gapfill".to_string(),
        generated_at: Utc::now(),
        base_year: config.base_year,
        family: config.family,
        models: models.clone(),
        predictions: predictions.to_vec(),
    }
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
    Ok(model)
}
