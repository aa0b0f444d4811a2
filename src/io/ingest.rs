//! CSV ingest.
//!
//! Turns a `year,percentage,population` CSV (with a header row) into a
//! year-sorted list of [`YearRecord`]s.
//!
//! Design goals:
//! - **Positional schema**: header names are not checked, columns are read by
//!   position.
//! - **Lenient fields**: an unparsable or missing numeric field degrades to `0`
//!   and is reported as a row warning instead of failing the run.
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Position, StringRecord};
use log::warn;

use crate::domain::YearRecord;
use crate::error::AppError;

/// Summary stats about the records read.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_records: usize,
    pub year_min: i32,
    pub year_max: i32,
}

/// A field that had to be defaulted during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    pub line: usize,
    pub message: String,
}

/// Ingest output: year-sorted records + stats + row warnings.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<YearRecord>,
    pub stats: DatasetStats,
    pub warnings: Vec<RowWarning>,
}

/// Load records from a CSV file on disk.
pub fn load_records(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_records(file)
}

/// Read records from any CSV source.
pub fn read_records<R: Read>(mut source: R) -> Result<IngestedData, AppError> {
    let mut text = String::new();
    source
        .read_to_string(&mut text)
        .map_err(|e| AppError::new(2, format!("Failed to read CSV: {e}")))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |pos| source_line(&text, pos));
        records.push(parse_row(&record, line, &mut warnings));
    }

    for w in &warnings {
        warn!("line {}: {}", w.line, w.message);
    }

    let stats = compute_stats(&records)
        .ok_or_else(|| AppError::new(3, "No data rows were read from the CSV."))?;

    // Stable: rows sharing a year keep their file order.
    records.sort_by_key(|r| r.year);

    Ok(IngestedData {
        records,
        stats,
        warnings,
    })
}

fn parse_row(record: &StringRecord, line: usize, warnings: &mut Vec<RowWarning>) -> YearRecord {
    let parse_f64 = |s: &str| s.parse::<f64>().ok();
    YearRecord {
        year: parse_field(record, 0, "year", line, warnings, parse_year).unwrap_or(0),
        percentage: parse_field(record, 1, "percentage", line, warnings, parse_f64).unwrap_or(0.0),
        population: parse_field(record, 2, "population", line, warnings, parse_f64).unwrap_or(0.0),
    }
}

fn parse_field<T>(
    record: &StringRecord,
    idx: usize,
    name: &str,
    line: usize,
    warnings: &mut Vec<RowWarning>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let message = match record.get(idx) {
        Some(raw) if !raw.is_empty() => match parse(raw) {
            Some(v) => return Some(v),
            None => format!("invalid `{name}` value '{raw}', using 0"),
        },
        _ => format!("missing `{name}`, using 0"),
    };
    warnings.push(RowWarning { line, message });
    None
}

/// 1-based line a record starts on.
///
/// The reader stamps a record with its position before skipping blank lines,
/// so those newlines are counted here.
fn source_line(text: &str, pos: &Position) -> usize {
    let skipped = text
        .as_bytes()
        .get(pos.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() as usize + skipped
}

/// Integer year, accepting a trailing fractional part (`"2005.0"`).
///
/// Values outside the `i32` range are rejected rather than saturated.
fn parse_year(s: &str) -> Option<i32> {
    s.parse::<i32>().ok().or_else(|| {
        let v = s.parse::<f64>().ok()?.trunc();
        (v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX)).then_some(v as i32)
    })
}

fn compute_stats(records: &[YearRecord]) -> Option<DatasetStats> {
    let year_min = records.iter().map(|r| r.year).min()?;
    let year_max = records.iter().map(|r| r.year).max()?;
    Some(DatasetStats {
        n_records: records.len(),
        year_min,
        year_max,
    })
}
