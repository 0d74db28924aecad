use thiserror::Error;

/// Failures while building the store. All of them are fatal: the process
/// cannot serve anything from a malformed dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read the dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' is missing from the dataset")]
    MissingColumn(&'static str),

    #[error("Row {row}: could not parse date '{value}' with format '{format}'")]
    InvalidDate {
        row: usize,
        value: String,
        format: String,
    },

    #[error("Row {row}: open price is zero, daily return cannot be derived for {ticker} on {date}")]
    ZeroOpen {
        row: usize,
        ticker: String,
        date: chrono::NaiveDate,
    },

    #[error("Duplicate observation for {ticker} on {date}")]
    DuplicateDate {
        ticker: String,
        date: chrono::NaiveDate,
    },

    #[error("The dataset contains no observations")]
    Empty,
}
