//! Fixed-size ASCII chart of one series, printed after `gapfill impute --plot`.
//!
//! Marks:
//! - observed points: `o`
//! - imputed points: `x`
//! - fitted curve: `-` line

use crate::domain::{Prediction, Series, YearRecord};
use crate::models::SeriesModel;

/// Data-to-cell mapping for one fixed-size character canvas.
struct Canvas {
    cells: Vec<Vec<char>>,
    years: (f64, f64),
    values: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, years: (f64, f64), values: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            years,
            values,
        }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// `(column, row)` of a data point; row 0 is the top (largest value).
    fn cell(&self, year: f64, value: f64) -> (usize, usize) {
        let top = (self.height() - 1) as f64;
        let col = (fraction(year, self.years) * (self.width() - 1) as f64).round() as usize;
        let row = (top - fraction(value, self.values) * top).round() as usize;
        (col, row)
    }

    fn mark(&mut self, year: f64, value: f64, ch: char) {
        let (col, row) = self.cell(year, value);
        self.cells[row][col] = ch;
    }

    /// Connect consecutive finite curve samples; never overwrites a mark.
    fn trace(&mut self, curve: &[(f64, f64)]) {
        let mut last: Option<(usize, usize)> = None;
        for &(year, value) in curve {
            if !value.is_finite() {
                last = None;
                continue;
            }
            let here = self.cell(year, value);
            match last {
                Some(from) => self.segment(from, here),
                None => self.cells[here.1][here.0] = '-',
            }
            last = Some(here);
        }
    }

    /// Bresenham segment between two cells.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize)) {
        let (mut col, mut row) = (from.0 as isize, from.1 as isize);
        let (end_col, end_row) = (to.0 as isize, to.1 as isize);
        let dx = (end_col - col).abs();
        let dy = -(end_row - row).abs();
        let step_col = if col < end_col { 1 } else { -1 };
        let step_row = if row < end_row { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if let Some(c) = self
                .cells
                .get_mut(row as usize)
                .and_then(|line| line.get_mut(col as usize))
                && *c == ' '
            {
                *c = '-';
            }
            if col == end_col && row == end_row {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                col += step_col;
            }
            if e2 <= dx {
                err += dx;
                row += step_row;
            }
        }
    }

    fn into_text(self) -> String {
        self.cells
            .into_iter()
            .map(|line| line.into_iter().chain(std::iter::once('\n')).collect::<String>())
            .collect()
    }
}

/// Render one series: observed rows, imputed values, and the fitted curve.
pub fn render_series_plot(
    series: Series,
    records: &[YearRecord],
    predictions: &[Prediction],
    model: &SeriesModel,
    base_year: i32,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let observed: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (f64::from(r.year), series.value_of(r)))
        .collect();
    let imputed: Vec<(f64, f64)> = predictions
        .iter()
        .map(|p| (f64::from(p.year), series.value_of(&YearRecord::from(*p))))
        .collect();

    let years = span(observed.iter().chain(&imputed).map(|&(t, _)| t)).unwrap_or((0.0, 1.0));
    let curve: Vec<(f64, f64)> = (0..width)
        .map(|i| {
            let u = i as f64 / (width - 1) as f64;
            let t = years.0 + u * (years.1 - years.0);
            (t, model.predict(t - f64::from(base_year)))
        })
        .collect();

    let (lo, hi) = span(
        observed
            .iter()
            .chain(&imputed)
            .chain(&curve)
            .map(|&(_, y)| y)
            .filter(|y| y.is_finite()),
    )
    .unwrap_or((0.0, 1.0));
    let pad = ((hi - lo) * 0.05).max(1e-12);
    let values = (lo - pad, hi + pad);

    let mut canvas = Canvas::new(width, height, years, values);
    canvas.trace(&curve);
    for &(t, y) in &observed {
        canvas.mark(t, y, 'o');
    }
    for &(t, y) in &imputed {
        canvas.mark(t, y, 'x');
    }

    format!(
        "Plot: {} | year=[{:.0}, {:.0}] | y=[{:.2}, {:.2}]\n{}",
        series.display_name(),
        years.0,
        years.1,
        values.0,
        values.1,
        canvas.into_text()
    )
}

/// `(min, max)` of the values, or `None` when they do not span a positive width.
fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

/// Relative position of `v` inside `range`, clamped to `[0, 1]`.
fn fraction(v: f64, range: (f64, f64)) -> f64 {
    ((v - range.0) / (range.1 - range.0)).clamp(0.0, 1.0)
}
