//! Year normalization.
//!
//! Polynomial normal equations contain sums of `x^(2d)`; with raw calendar years
//! (`x ≈ 2000`) those entries explode and the system becomes ill-conditioned.
//! Every fit therefore works on `x = year - base_year`.

use serde::{Deserialize, Serialize};

/// Shifts calendar years by a fixed base year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearNormalizer {
    pub base_year: i32,
}

impl YearNormalizer {
    pub fn new(base_year: i32) -> Self {
        Self { base_year }
    }

    pub fn normalize(&self, year: i32) -> f64 {
        f64::from(year) - f64::from(self.base_year)
    }

    pub fn normalize_all(&self, years: &[i32]) -> Vec<f64> {
        years.iter().map(|&y| self.normalize(y)).collect()
    }

    /// Inverse of [`normalize`](Self::normalize) for whole-year offsets.
    ///
    /// `None` when the offset is not finite or the year does not fit an `i32`.
    pub fn restore(&self, x: f64) -> Option<i32> {
        let year = x.round() + f64::from(self.base_year);
        (year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX)).then_some(year as i32)
    }
}

impl Default for YearNormalizer {
    fn default() -> Self {
        Self::new(2000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_then_restore_is_identity() {
        let norm = YearNormalizer::new(2000);
        let years = [1990, 1999, 2000, 2005, 2016, 2023];
        let xs = norm.normalize_all(&years);
        assert_eq!(xs, vec![-10.0, -1.0, 0.0, 5.0, 16.0, 23.0]);

        let back: Option<Vec<i32>> = xs.iter().map(|&x| norm.restore(x)).collect();
        assert_eq!(back, Some(years.to_vec()));
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let norm = YearNormalizer::new(2000);
        assert_eq!(norm.normalize(i32::MIN), f64::from(i32::MIN) - 2000.0);
        assert_eq!(YearNormalizer::new(i32::MIN).normalize(i32::MAX), 4294967295.0);

        assert_eq!(norm.restore(f64::from(i32::MAX)), None);
        assert_eq!(norm.restore(f64::NAN), None);
        assert_eq!(norm.restore(-4000.0), Some(-2000));
    }

    #[test]
    fn default_base_year_is_2000() {
        assert_eq!(YearNormalizer::default().normalize(2010), 10.0);
    }
}
