//! Exponential regression via log-linearization.
//!
//! `y = a·e^(b·x)` becomes `ln y = ln a + b·x`, which is an ordinary straight-line
//! fit. Samples with `y <= 0` have no logarithm and are dropped (not an error).

use log::debug;

use crate::domain::Sample;
use crate::error::FitError;
use crate::fit::linear::linear_regression;
use crate::models::ExponentialModel;

pub fn exponential_regression(samples: &[Sample]) -> Result<ExponentialModel, FitError> {
    let log_samples: Vec<Sample> = samples
        .iter()
        .filter(|s| s.y > 0.0)
        .map(|s| Sample::new(s.x, s.y.ln()))
        .collect();

    let dropped = samples.len() - log_samples.len();
    if dropped > 0 {
        debug!("exponential fit: dropped {dropped} non-positive sample(s)");
    }

    let line = linear_regression(&log_samples)?;
    Ok(ExponentialModel {
        a: line.intercept.exp(),
        b: line.slope,
    })
}
