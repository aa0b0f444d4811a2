//! Export the completed dataset to CSV.
//!
//! Format: `Year,Percentage_Internet_User,Population`, percentage with six
//! decimals, population rounded to a whole number.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::YearRecord;
use crate::error::AppError;

pub const CSV_HEADER: &str = "Year,Percentage_Internet_User,Population";

/// Write the completed dataset to a CSV file.
pub fn write_completed_csv(path: &Path, records: &[YearRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create output CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_records(&mut out, records)?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush output CSV: {e}")))
}

/// Write records in the output CSV format to any sink.
pub fn write_records<W: Write>(out: &mut W, records: &[YearRecord]) -> Result<(), AppError> {
    writeln!(out, "{CSV_HEADER}")
        .map_err(|e| AppError::new(2, format!("Failed to write output CSV header: {e}")))?;

    for r in records {
        writeln!(out, "{},{:.6},{:.0}", r.year, r.percentage, r.population)
            .map_err(|e| AppError::new(2, format!("Failed to write output CSV row: {e}")))?;
    }

    Ok(())
}
