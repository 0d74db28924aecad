use crate::error::DatasetError;
use crate::store::DatasetStore;
use chrono::NaiveDate;
use core_types::Observation;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// The columns every dataset must carry. `Daily Returns %` is optional.
pub const REQUIRED_COLUMNS: [&str; 7] = ["Ticker", "Date", "Open", "High", "Low", "Close", "Volume"];

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A raw row as it appears in the source file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: f64,
    #[serde(rename = "Daily Returns %", default)]
    daily_return_pct: Option<f64>,
}

/// Loads the dataset file and builds the immutable store.
///
/// Any schema or row error aborts the load.
pub fn load_csv(path: impl AsRef<Path>, date_format: &str) -> Result<DatasetStore, DatasetError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading dataset.");
    let file = std::fs::File::open(path)?;
    let store = load_from_reader(file, date_format)?;
    tracing::info!(
        rows = store.len(),
        tickers = store.tickers().len(),
        "Dataset loaded."
    );
    Ok(store)
}

/// Same as [`load_csv`], for any byte source.
pub fn load_from_reader<R: Read>(reader: R, date_format: &str) -> Result<DatasetStore, DatasetError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;

    let mut observations = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let row_number = index + 2;
        let row = result?;
        observations.push(to_observation(row, row_number, date_format)?);
    }

    DatasetStore::from_observations(observations)
}

fn check_required_columns(headers: &StringRecord) -> Result<(), DatasetError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }
    Ok(())
}

fn to_observation(row: CsvRow, row_number: usize, date_format: &str) -> Result<Observation, DatasetError> {
    let date = parse_date(&row.date, date_format).ok_or_else(|| DatasetError::InvalidDate {
        row: row_number,
        value: row.date.clone(),
        format: date_format.to_string(),
    })?;

    let daily_return_pct = match row.daily_return_pct {
        Some(value) => value,
        None if row.open == 0.0 => {
            return Err(DatasetError::ZeroOpen {
                row: row_number,
                ticker: row.ticker,
                date,
            });
        }
        None => (row.close - row.open) / row.open * 100.0,
    };

    Ok(Observation {
        ticker: row.ticker,
        date,
        open: row.open,
        high: row.high,
        low: row.low,
        close: row.close,
        volume: row.volume,
        daily_return_pct,
    })
}

/// Parses a date cell. Timestamps such as `2022-11-03 00:00:00` are accepted
/// when the configured format is date-only, keeping just the calendar date.
fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, format) {
        return Some(date);
    }
    let (date_part, _) = value.split_once([' ', 'T'])?;
    NaiveDate::parse_from_str(date_part, format).ok()
}
