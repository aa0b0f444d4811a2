//! Model evaluation for the linear / exponential / polynomial families.
//!
//! Fitting lives in `crate::fit`; this module only knows how to evaluate a
//! calibrated model at a normalized `x`.

use serde::{Deserialize, Serialize};

use crate::domain::Series;

/// `y = intercept + slope·x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearModel {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// `y = a·e^(b·x)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialModel {
    pub a: f64,
    pub b: f64,
}

impl ExponentialModel {
    pub fn predict(&self, x: f64) -> f64 {
        self.a * (self.b * x).exp()
    }
}

/// `y = Σ coefficients[i]·x^i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialModel {
    pub coefficients: Vec<f64>,
}

impl PolynomialModel {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn predict(&self, x: f64) -> f64 {
        evaluate_polynomial(&self.coefficients, x)
    }
}

/// Evaluate `Σ coef[i]·x^i` with Horner's scheme.
pub fn evaluate_polynomial(coef: &[f64], x: f64) -> f64 {
    coef.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// A fitted curve for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SeriesModel {
    Linear(LinearModel),
    Exponential(ExponentialModel),
    Polynomial(PolynomialModel),
}

impl SeriesModel {
    pub fn predict(&self, x: f64) -> f64 {
        match self {
            SeriesModel::Linear(m) => m.predict(x),
            SeriesModel::Exponential(m) => m.predict(x),
            SeriesModel::Polynomial(m) => m.predict(x),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SeriesModel::Linear(_) => "Linear",
            SeriesModel::Exponential(_) => "Exponential",
            SeriesModel::Polynomial(_) => "Polynomial",
        }
    }
}

/// The pair of models produced by one fit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModels {
    pub percentage: SeriesModel,
    pub population: SeriesModel,
}

impl FittedModels {
    pub fn for_series(&self, series: Series) -> &SeriesModel {
        match series {
            Series::Percentage => &self.percentage,
            Series::Population => &self.population,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_matches_power_sum() {
        let coef = [1.5, -2.0, 0.25, 0.125];
        for &x in &[-3.0, -0.5, 0.0, 1.0, 4.0, 16.0] {
            let direct: f64 = coef
                .iter()
                .enumerate()
                .map(|(i, c)| c * f64::powi(x, i as i32))
                .sum();
            let horner = evaluate_polynomial(&coef, x);
            assert!((direct - horner).abs() < 1e-9, "x={x}: {direct} vs {horner}");
        }
    }

    #[test]
    fn empty_polynomial_is_zero() {
        assert_eq!(evaluate_polynomial(&[], 3.0), 0.0);
        assert_eq!(PolynomialModel { coefficients: vec![] }.degree(), 0);
    }

    #[test]
    fn series_model_dispatches() {
        let lin = SeriesModel::Linear(LinearModel { intercept: 1.0, slope: 2.0 });
        assert_eq!(lin.predict(3.0), 7.0);

        let exp = SeriesModel::Exponential(ExponentialModel { a: 10.0, b: 0.0 });
        assert_eq!(exp.predict(42.0), 10.0);
    }

    #[test]
    fn series_model_json_is_tagged() {
        let m = SeriesModel::Linear(LinearModel { intercept: 1.0, slope: 2.0 });
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"kind":"linear","intercept":1.0,"slope":2.0}"#);
    }
}
