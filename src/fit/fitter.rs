//! Fit-family orchestration.
//!
//! Given the percentage and population samples of a dataset, fit both series
//! with the configured [`FitFamily`]:
//!
//! | family        | percentage                 | population                 |
//! | ------------- | -------------------------- | -------------------------- |
//! | `Exponential` | `a·e^(b·x)`                | `a + b·x`                  |
//! | `Polynomial`  | degree `degree_percentage` | degree `degree_population` |
//!
//! and evaluate the pair at arbitrary years, applying the range correction the
//! family calls for.

use log::debug;

use crate::domain::{ClampMode, FitFamily, Prediction, Sample, Series};
use crate::error::FitError;
use crate::fit::{exponential_regression, linear_regression, polynomial_regression};
use crate::math::YearNormalizer;
use crate::models::{FittedModels, SeriesModel};

/// Fitting options shared by both series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOptions {
    pub family: FitFamily,
    pub degree_percentage: usize,
    pub degree_population: usize,
}

/// Fit one series with the model its family prescribes.
pub fn fit_series(series: Series, samples: &[Sample], opts: &FitOptions) -> Result<SeriesModel, FitError> {
    let model = match (opts.family, series) {
        (FitFamily::Exponential, Series::Percentage) => {
            SeriesModel::Exponential(exponential_regression(samples)?)
        }
        (FitFamily::Exponential, Series::Population) => SeriesModel::Linear(linear_regression(samples)?),
        (FitFamily::Polynomial, Series::Percentage) => {
            SeriesModel::Polynomial(polynomial_regression(samples, opts.degree_percentage)?)
        }
        (FitFamily::Polynomial, Series::Population) => {
            SeriesModel::Polynomial(polynomial_regression(samples, opts.degree_population)?)
        }
    };
    debug!("fitted {:?} with {} model on {} samples", series, model.display_name(), samples.len());
    Ok(model)
}

/// Fit both series. Either failure aborts the whole fit.
pub fn fit_models(
    percentage: &[Sample],
    population: &[Sample],
    opts: &FitOptions,
) -> Result<FittedModels, FitError> {
    Ok(FittedModels {
        percentage: fit_series(Series::Percentage, percentage, opts)?,
        population: fit_series(Series::Population, population, opts)?,
    })
}

/// Clamp a raw prediction into the series' valid range.
///
/// - percentage: `[0, 100]`
/// - population: `[0, ∞)`
pub fn correct_range(series: Series, value: f64) -> f64 {
    let corrected = match series {
        Series::Percentage => value.clamp(0.0, 100.0),
        Series::Population => value.max(0.0),
    };
    if corrected != value {
        debug!("range correction on {series:?}: {value} -> {corrected}");
    }
    corrected
}

/// Predict both series at each of `years`.
pub fn predict_years(
    models: &FittedModels,
    years: &[i32],
    normalizer: &YearNormalizer,
    family: FitFamily,
    clamp: ClampMode,
) -> Vec<Prediction> {
    let clamp = clamp.applies_to(family);
    years
        .iter()
        .map(|&year| {
            let x = normalizer.normalize(year);
            let mut percentage = models.percentage.predict(x);
            let mut population = models.population.predict(x);
            if clamp {
                percentage = correct_range(Series::Percentage, percentage);
                population = correct_range(Series::Population, population);
            }
            Prediction {
                year,
                percentage,
                population,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinearModel, PolynomialModel};

    fn opts(family: FitFamily) -> FitOptions {
        FitOptions {
            family,
            degree_percentage: 3,
            degree_population: 2,
        }
    }

    fn grid(f: impl Fn(f64) -> f64) -> Vec<Sample> {
        (0..10).map(|i| Sample::new(f64::from(i), f(f64::from(i)))).collect()
    }

    #[test]
    fn exponential_family_pairs_exp_with_linear() {
        let pct = grid(|x| 2.0 * (0.3 * x).exp());
        let pop = grid(|x| 1000.0 + 25.0 * x);
        let models = fit_models(&pct, &pop, &opts(FitFamily::Exponential)).unwrap();

        assert!(matches!(models.percentage, SeriesModel::Exponential(_)));
        match models.population {
            SeriesModel::Linear(m) => {
                assert!((m.intercept - 1000.0).abs() < 1e-6);
                assert!((m.slope - 25.0).abs() < 1e-9);
            }
            other => panic!("expected linear population model, got {other:?}"),
        }
    }

    #[test]
    fn polynomial_family_uses_configured_degrees() {
        let pct = grid(|x| 1.0 + x * x);
        let pop = grid(|x| 5.0 - x);
        let models = fit_models(&pct, &pop, &opts(FitFamily::Polynomial)).unwrap();

        match (&models.percentage, &models.population) {
            (SeriesModel::Polynomial(p), SeriesModel::Polynomial(q)) => {
                assert_eq!(p.degree(), 3);
                assert_eq!(q.degree(), 2);
            }
            other => panic!("unexpected models {other:?}"),
        }
    }

    #[test]
    fn failure_in_either_series_aborts() {
        let pct = grid(|x| x + 1.0);
        let pop = vec![Sample::new(1.0, 1.0)];
        let err = fit_models(&pct, &pop, &opts(FitFamily::Exponential)).unwrap_err();
        assert!(matches!(err, FitError::DegenerateInput { .. }));
    }

    #[test]
    fn clamping_law_holds_for_wild_polynomials() {
        let models = FittedModels {
            percentage: SeriesModel::Polynomial(PolynomialModel {
                coefficients: vec![50.0, 0.0, -3.0, 0.5],
            }),
            population: SeriesModel::Polynomial(PolynomialModel {
                coefficients: vec![100.0, -40.0],
            }),
        };
        let years: Vec<i32> = (1980..=2030).collect();
        let preds = predict_years(
            &models,
            &years,
            &YearNormalizer::new(2000),
            FitFamily::Polynomial,
            ClampMode::Polynomial,
        );

        assert!(preds.iter().any(|p| p.percentage == 0.0));
        assert!(preds.iter().any(|p| p.percentage == 100.0));
        for p in &preds {
            assert!((0.0..=100.0).contains(&p.percentage), "{p:?}");
            assert!(p.population >= 0.0, "{p:?}");
        }
    }

    #[test]
    fn exponential_path_is_not_clamped_by_default() {
        let models = FittedModels {
            percentage: SeriesModel::Linear(LinearModel { intercept: 150.0, slope: 0.0 }),
            population: SeriesModel::Linear(LinearModel { intercept: -5.0, slope: 0.0 }),
        };
        let norm = YearNormalizer::new(2000);

        let raw = predict_years(&models, &[2005], &norm, FitFamily::Exponential, ClampMode::Polynomial);
        assert_eq!(raw[0].percentage, 150.0);
        assert_eq!(raw[0].population, -5.0);

        let clamped = predict_years(&models, &[2005], &norm, FitFamily::Exponential, ClampMode::Always);
        assert_eq!(clamped[0].percentage, 100.0);
        assert_eq!(clamped[0].population, 0.0);
    }
}
