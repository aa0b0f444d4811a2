//! Polynomial least squares via the normal equations.
//!
//! For degree `d` we assemble the `(d+1)×(d+1)` system
//!
//! ```text
//! A[i][j] = Σ_k x_k^(i+j)
//! B[i]    = Σ_k y_k · x_k^i
//! ```
//!
//! and hand it to the Gauss–Jordan solver. `A` is a Hankel matrix of power sums,
//! so each sample contributes its powers `x^0 ..= x^(2d)` once.
//!
//! Numerical notes:
//! - `A` is symmetric positive semi-definite, but its condition number grows
//!   very fast with `|x|` and `d`. Inputs must be normalized years.
//! - Fewer distinct `x` values than `d + 1` makes `A` singular; the solver
//!   reports that as `FitError::SingularSystem`.

use crate::domain::Sample;
use crate::error::FitError;
use crate::math::solve_linear_system;
use crate::models::PolynomialModel;

pub fn polynomial_regression(samples: &[Sample], degree: usize) -> Result<PolynomialModel, FitError> {
    if samples.is_empty() {
        return Err(FitError::DegenerateInput {
            samples: 0,
            reason: "polynomial regression needs at least one sample",
        });
    }

    let (a, b) = normal_equations(samples, degree);
    let coefficients = solve_linear_system(&a, &b)?;
    Ok(PolynomialModel { coefficients })
}

/// Build the normal-equation matrix and right-hand side for `degree`.
pub fn normal_equations(samples: &[Sample], degree: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let m = degree + 1;
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut b = vec![0.0; m];
    let mut powers = vec![0.0; 2 * degree + 1];

    for s in samples {
        let mut p = 1.0;
        for slot in powers.iter_mut() {
            *slot = p;
            p *= s.x;
        }
        for (acc, p) in power_sums.iter_mut().zip(&powers) {
            *acc += p;
        }
        for (acc, p) in b.iter_mut().zip(&powers[..m]) {
            *acc += s.y * p;
        }
    }

    let a = (0..m)
        .map(|i| power_sums[i..i + m].to_vec())
        .collect();
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_fn(xs: impl IntoIterator<Item = f64>, f: impl Fn(f64) -> f64) -> Vec<Sample> {
        xs.into_iter().map(|x| Sample::new(x, f(x))).collect()
    }

    #[test]
    fn recovers_exact_cubic() {
        let truth = [2.0, -1.5, 0.3, 0.02];
        let samples = from_fn((-5..=5).map(f64::from), |x| {
            truth[0] + truth[1] * x + truth[2] * x * x + truth[3] * x * x * x
        });

        let fit = polynomial_regression(&samples, 3).unwrap();
        assert_eq!(fit.coefficients.len(), 4);
        for (got, want) in fit.coefficients.iter().zip(truth) {
            assert!(((got - want) / want).abs() < 1e-6, "got {:?}", fit.coefficients);
        }
    }

    #[test]
    fn degree_zero_is_the_mean() {
        let samples = from_fn([0.0, 1.0, 2.0, 3.0, 4.0], |x| (x * 7.0) % 5.0);
        let mean = samples.iter().map(|s| s.y).sum::<f64>() / samples.len() as f64;

        let fit = polynomial_regression(&samples, 0).unwrap();
        for &x in &[-10.0, 0.0, 2.5, 100.0] {
            assert!((fit.predict(x) - mean).abs() < 1e-12);
        }
    }

    #[test]
    fn degree_one_matches_linear_regression() {
        let samples = from_fn([-2.0, 0.0, 1.0, 5.0, 6.0], |x| 3.0 + 0.5 * x + (x * 1.3).sin());
        let poly = polynomial_regression(&samples, 1).unwrap();
        let line = crate::fit::linear_regression(&samples).unwrap();
        assert!((poly.coefficients[0] - line.intercept).abs() < 1e-9);
        assert!((poly.coefficients[1] - line.slope).abs() < 1e-9);
    }

    #[test]
    fn normal_matrix_is_hankel_of_power_sums() {
        let samples = [Sample::new(1.0, 1.0), Sample::new(2.0, 3.0)];
        let (a, b) = normal_equations(&samples, 2);
        assert_eq!(
            a,
            vec![
                vec![2.0, 3.0, 5.0],
                vec![3.0, 5.0, 9.0],
                vec![5.0, 9.0, 17.0],
            ]
        );
        assert_eq!(b, vec![4.0, 7.0, 13.0]);
    }

    #[test]
    fn too_few_points_for_degree_is_singular() {
        let samples = [Sample::new(0.0, 1.0), Sample::new(1.0, 2.0)];
        let err = polynomial_regression(&samples, 3).unwrap_err();
        assert!(matches!(err, FitError::SingularSystem { .. }), "got {err:?}");
    }

    #[test]
    fn empty_samples_are_degenerate() {
        let err = polynomial_regression(&[], 2).unwrap_err();
        assert!(matches!(err, FitError::DegenerateInput { samples: 0, .. }));
    }
}
