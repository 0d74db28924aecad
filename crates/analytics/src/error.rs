use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("No data for the requested filter: {0}")]
    EmptyInput(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Not enough data to compute '{0}'")]
    InsufficientData(String),

    #[error("Aligned series are out of step: {0}")]
    UnalignedData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<CoreError> for StatsError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::UnknownField(name) => StatsError::InvalidField(format!("unknown column '{name}'")),
            CoreError::NonNumericField(name) => {
                StatsError::InvalidField(format!("column '{name}' is not numeric"))
            }
            CoreError::Unaligned(detail) => StatsError::UnalignedData(detail),
            other => StatsError::InvalidParameter(other.to_string()),
        }
    }
}
