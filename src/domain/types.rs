//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to CSV/JSON
//! - printed in reports

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, FitError};
use crate::models::FittedModels;

/// Years imputed when nothing else is configured.
pub const DEFAULT_MISSING_YEARS: [i32; 4] = [2005, 2006, 2015, 2016];

/// Highest polynomial degree accepted from configuration.
pub const MAX_DEGREE: usize = 10;

/// One regression input: normalized year and observed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pair up separate `x` and `y` sequences, preserving order.
pub fn samples_from(xs: &[f64], ys: &[f64]) -> Result<Vec<Sample>, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }
    Ok(xs.iter().zip(ys).map(|(&x, &y)| Sample::new(x, y)).collect())
}

/// A row of the yearly dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub percentage: f64,
    pub population: f64,
}

/// Imputed values for one missing year (after range correction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub year: i32,
    pub percentage: f64,
    pub population: f64,
}

impl From<Prediction> for YearRecord {
    fn from(p: Prediction) -> Self {
        YearRecord {
            year: p.year,
            percentage: p.percentage,
            population: p.population,
        }
    }
}

/// The two series carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Percentage,
    Population,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Percentage, Series::Population];

    pub fn display_name(self) -> &'static str {
        match self {
            Series::Percentage => "Percentage of internet users",
            Series::Population => "Population",
        }
    }

    /// Decimal places used when printing coefficients of this series.
    pub fn coefficient_precision(self) -> usize {
        match self {
            Series::Percentage => 6,
            Series::Population => 2,
        }
    }

    pub fn value_of(self, record: &YearRecord) -> f64 {
        match self {
            Series::Percentage => record.percentage,
            Series::Population => record.population,
        }
    }
}

/// Which pair of curve families to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitFamily {
    /// Exponential percentage curve, linear population trend.
    Exponential,
    /// Polynomial curves for both series.
    Polynomial,
}

impl FitFamily {
    pub fn display_name(self) -> &'static str {
        match self {
            FitFamily::Exponential => "exponential + linear",
            FitFamily::Polynomial => "polynomial",
        }
    }
}

/// Where the `[0, 100]` / `>= 0` range correction applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClampMode {
    /// Only polynomial predictions are corrected.
    Polynomial,
    /// Every prediction is corrected, whatever the family.
    Always,
}

impl ClampMode {
    pub fn applies_to(self, family: FitFamily) -> bool {
        match self {
            ClampMode::Polynomial => family == FitFamily::Polynomial,
            ClampMode::Always => true,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags / environment (plus defaults).
#[derive(Debug, Clone)]
pub struct ImputeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub family: FitFamily,
    /// Normalization anchor; also the first year used for the percentage fit.
    pub base_year: i32,
    pub degree_percentage: usize,
    pub degree_population: usize,
    pub missing_years: Vec<i32>,
    pub clamp: ClampMode,

    pub export_model: Option<PathBuf>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for ImputeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            output: PathBuf::from("completed.csv"),
            family: FitFamily::Exponential,
            base_year: 2000,
            degree_percentage: 3,
            degree_population: 2,
            missing_years: DEFAULT_MISSING_YEARS.to_vec(),
            clamp: ClampMode::Polynomial,
            export_model: None,
            plot: false,
            plot_width: 72,
            plot_height: 16,
        }
    }
}

impl ImputeConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.missing_years.is_empty() {
            return Err(AppError::new(2, "At least one missing year must be configured."));
        }
        for (name, degree) in [
            ("percentage", self.degree_percentage),
            ("population", self.degree_population),
        ] {
            if degree > MAX_DEGREE {
                return Err(AppError::new(
                    2,
                    format!("Polynomial degree for {name} must be <= {MAX_DEGREE} (got {degree})."),
                ));
            }
        }
        if self.plot && (self.plot_width == 0 || self.plot_height == 0) {
            return Err(AppError::new(2, "Plot width and height must be > 0."));
        }
        Ok(())
    }
}

/// A saved fit run (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub base_year: i32,
    pub family: FitFamily,
    pub models: FittedModels,
    pub predictions: Vec<Prediction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_from_rejects_unequal_lengths() {
        let err = samples_from(&[0.0, 1.0], &[1.0]).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x: 2, y: 1 });
    }

    #[test]
    fn samples_from_preserves_pairing() {
        let samples = samples_from(&[3.0, 1.0], &[30.0, 10.0]).unwrap();
        assert_eq!(samples, vec![Sample::new(3.0, 30.0), Sample::new(1.0, 10.0)]);
    }

    #[test]
    fn clamp_mode_scope() {
        assert!(ClampMode::Polynomial.applies_to(FitFamily::Polynomial));
        assert!(!ClampMode::Polynomial.applies_to(FitFamily::Exponential));
        assert!(ClampMode::Always.applies_to(FitFamily::Exponential));
    }

    #[test]
    fn validate_rejects_bad_config() {
        let cfg = ImputeConfig {
            missing_years: vec![],
            ..ImputeConfig::default()
        };
        assert_eq!(cfg.validate().unwrap_err().exit_code(), 2);

        let cfg = ImputeConfig {
            degree_percentage: MAX_DEGREE + 1,
            ..ImputeConfig::default()
        };
        assert!(cfg.validate().is_err());

        assert!(ImputeConfig::default().validate().is_ok());
    }
}
