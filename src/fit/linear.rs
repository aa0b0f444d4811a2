//! Closed-form ordinary least squares for `y = a + b·x`.

use crate::domain::Sample;
use crate::error::FitError;
use crate::models::LinearModel;

/// Fit a straight line through `samples`.
///
/// ```text
/// b = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
/// a = (Σy − b·Σx) / n
/// ```
///
/// Needs at least two samples with distinct `x`.
pub fn linear_regression(samples: &[Sample]) -> Result<LinearModel, FitError> {
    let n = samples.len();
    if n < 2 {
        return Err(FitError::DegenerateInput {
            samples: n,
            reason: "linear regression needs at least two samples",
        });
    }
    let x0 = samples[0].x;
    if samples.iter().all(|s| s.x == x0) {
        return Err(FitError::DegenerateInput {
            samples: n,
            reason: "all x values are identical",
        });
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for s in samples {
        sum_x += s.x;
        sum_y += s.y;
        sum_xy += s.x * s.y;
        sum_x2 += s.x * s.x;
    }

    let nf = n as f64;
    let denom = nf * sum_x2 - sum_x * sum_x;
    if denom == 0.0 || !denom.is_finite() {
        return Err(FitError::DegenerateInput {
            samples: n,
            reason: "x values carry no spread",
        });
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / nf;

    Ok(LinearModel { intercept, slope })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let samples: Vec<Sample> = (-3..=5)
            .map(|i| {
                let x = f64::from(i);
                Sample::new(x, 2.5 - 0.75 * x)
            })
            .collect();
        let fit = linear_regression(&samples).unwrap();
        assert!((fit.intercept - 2.5).abs() < 1e-9);
        assert!((fit.slope + 0.75).abs() < 1e-9);
    }

    #[test]
    fn least_squares_through_noisy_points() {
        // Noise orthogonal to [1, x] around y = 1 + 2x leaves the fit unchanged.
        let samples = [
            Sample::new(0.0, 1.5),
            Sample::new(1.0, 2.5),
            Sample::new(2.0, 4.5),
            Sample::new(3.0, 7.5),
        ];
        let fit = linear_regression(&samples).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9, "slope {}", fit.slope);
        assert!((fit.intercept - 1.0).abs() < 1e-9, "intercept {}", fit.intercept);
    }

    #[test]
    fn rejects_single_sample() {
        let err = linear_regression(&[Sample::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, FitError::DegenerateInput { samples: 1, .. }));
    }

    #[test]
    fn rejects_identical_x() {
        let samples = [Sample::new(4.0, 1.0), Sample::new(4.0, 2.0), Sample::new(4.0, 3.0)];
        let err = linear_regression(&samples).unwrap_err();
        assert!(matches!(err, FitError::DegenerateInput { samples: 3, .. }));
    }
}
