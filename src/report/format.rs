//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (covered by the string tests below)

use crate::domain::{FitFamily, Prediction, Series};
use crate::io::ingest::IngestedData;
use crate::models::{FittedModels, SeriesModel};

/// Format the run summary: dataset stats plus both fitted models.
pub fn format_run_summary(
    ingest: &IngestedData,
    family: FitFamily,
    models: &FittedModels,
    base_year: i32,
) -> String {
    let mut out = String::new();

    out.push_str("=== gapfill - yearly series imputation ===\n");
    out.push_str(&format!(
        "Rows read: {} | years=[{}, {}]\n",
        ingest.stats.n_records, ingest.stats.year_min, ingest.stats.year_max
    ));
    if !ingest.warnings.is_empty() {
        out.push_str(&format!("Fields defaulted to 0: {}\n", ingest.warnings.len()));
    }
    out.push_str(&format!("Family: {}\n", family.display_name()));

    for series in Series::ALL {
        let model = models.for_series(series);
        out.push_str(&format!(
            "\n{} regression ({}):\n",
            model.display_name(),
            series.display_name()
        ));
        out.push_str(&format!("Model: {}\n", format_equation(model, series, base_year)));
    }

    out
}

/// Render `y = ...` for a fitted model, in terms of the calendar year `x`.
pub fn format_equation(model: &SeriesModel, series: Series, base_year: i32) -> String {
    let p = series.coefficient_precision();
    match model {
        SeriesModel::Exponential(m) => {
            format!("y = {:.p$} * e^({:.p$} * (x - {base_year}))", m.a, m.b)
        }
        SeriesModel::Linear(m) => {
            format!(
                "y = {:.p$} {} {:.p$} * (x - {base_year})",
                m.intercept,
                sign(m.slope),
                m.slope.abs()
            )
        }
        SeriesModel::Polynomial(m) => {
            let mut out = String::from("y = ");
            for (i, &c) in m.coefficients.iter().enumerate() {
                if i == 0 {
                    out.push_str(&format!("{c:.p$}"));
                } else {
                    out.push_str(&format!(" {} {:.p$} * (x - {base_year})^{i}", sign(c), c.abs()));
                }
            }
            out
        }
    }
}

/// Format the table of imputed values.
pub fn format_predictions(predictions: &[Prediction]) -> String {
    let mut out = String::new();
    out.push_str("Predictions for missing years:\n");
    out.push_str(
        format!(
            "{:<6} {:<28} {:<15}",
            "Year",
            Series::Percentage.display_name(),
            Series::Population.display_name()
        )
        .trim_end(),
    );
    out.push('\n');

    for p in predictions {
        out.push_str(
            format!("{:<6} {:<28.6} {:<15.0}", p.year, p.percentage, p.population).trim_end(),
        );
        out.push('\n');
    }

    out
}

fn sign(v: f64) -> char {
    if v.is_sign_negative() { '-' } else { '+' }
}
