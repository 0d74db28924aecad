use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Unknown chart '{0}'. Expected candlestick, price-line, returns-line or returns-histogram.")]
    UnknownChart(String),
}
