//! Gauss–Jordan elimination with partial pivoting.
//!
//! The systems we solve are the normal equations of small polynomial fits
//! (at most a handful of unknowns), so a dense `O(n³)` elimination on an
//! augmented copy is all we need.
//!
//! ```text
//! [A | b]  --row ops-->  [I | x]
//! ```
//!
//! For each pivot column we pick the row with the largest magnitude entry at or
//! below the diagonal, swap it into place, scale it to a unit pivot, and clear
//! that column from every other row. A pivot below [`PIVOT_TOLERANCE`] aborts the
//! solve; no approximate solution is ever returned.

use log::trace;

use crate::error::FitError;

/// Pivots smaller than this (in absolute value) mark the system as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Solve `A·x = b` for a square `A`.
///
/// `a` is given as rows. Neither `a` nor `b` is modified; elimination runs on an
/// owned augmented copy.
pub fn solve_linear_system(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, FitError> {
    let n = a.len();
    if b.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(FitError::DimensionMismatch {
            rows: n,
            cols: a.iter().map(Vec::len).max().unwrap_or(0),
            rhs: b.len(),
        });
    }

    let mut aug = augment(a, b);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&r1, &r2| aug[r1][col].abs().total_cmp(&aug[r2][col].abs()))
            .unwrap_or(col);
        if pivot_row != col {
            aug.swap(col, pivot_row);
        }

        let pivot = aug[col][col];
        if pivot.abs() < PIVOT_TOLERANCE || !pivot.is_finite() {
            return Err(FitError::SingularSystem { column: col, pivot });
        }
        trace!("gauss-jordan: column {col} pivot {pivot:e} (row {pivot_row})");

        for v in aug[col].iter_mut() {
            *v /= pivot;
        }

        let pivot_values = aug[col].clone();
        for (row_idx, row) in aug.iter_mut().enumerate() {
            if row_idx == col {
                continue;
            }
            let factor = row[col];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in row.iter_mut().zip(&pivot_values) {
                *v -= factor * p;
            }
        }
    }

    Ok(aug.into_iter().map(|row| row[n]).collect())
}

fn augment(a: &[Vec<f64>], b: &[f64]) -> Vec<Vec<f64>> {
    a.iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut out = Vec::with_capacity(row.len() + 1);
            out.extend_from_slice(row);
            out.push(rhs);
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[f64]]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn solves_known_3x3_system() {
        // x = [1, 2, 3]
        let a = mat(&[&[2.0, 1.0, -1.0], &[-3.0, -1.0, 2.0], &[-2.0, 1.0, 2.0]]);
        let b = [2.0 + 2.0 - 3.0, -3.0 - 2.0 + 6.0, -2.0 + 2.0 + 6.0];

        let x = solve_linear_system(&a, &b).unwrap();
        for (got, want) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-9, "got {x:?}");
        }
    }

    #[test]
    fn requires_pivoting_when_leading_entry_is_zero() {
        let a = mat(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let x = solve_linear_system(&a, &[5.0, 7.0]).unwrap();
        assert!((x[0] - 7.0).abs() < 1e-12);
        assert!((x[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn duplicated_row_is_singular() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &[0.0, 1.0, 4.0]]);
        let err = solve_linear_system(&a, &[1.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, FitError::SingularSystem { .. }), "got {err:?}");
    }

    #[test]
    fn inputs_are_left_untouched() {
        let a = mat(&[&[4.0, 1.0], &[2.0, 3.0]]);
        let b = vec![1.0, 2.0];
        let (a_before, b_before) = (a.clone(), b.clone());
        solve_linear_system(&a, &b).unwrap();
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn rejects_non_square_systems() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let err = solve_linear_system(&a, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, FitError::DimensionMismatch { rows: 2, cols: 3, rhs: 2 });
    }

    #[test]
    fn empty_system_has_empty_solution() {
        assert!(solve_linear_system(&[], &[]).unwrap().is_empty());
    }
}
