use serde::{Deserialize, Serialize};

/// Shared trading days split by the direction each ticker closed.
///
/// The four buckets always partition `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingDayCounts {
    pub total: usize,
    pub both_up: usize,
    pub both_down_or_flat: usize,
    pub primary_up_benchmark_down: usize,
    pub primary_down_benchmark_up: usize,
}

impl TradingDayCounts {
    pub fn is_partition(&self) -> bool {
        self.both_up
            + self.both_down_or_flat
            + self.primary_up_benchmark_down
            + self.primary_down_benchmark_up
            == self.total
    }
}

/// Co-movement statistics against the selected benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    pub ticker: String,
    pub covariance: Option<f64>,
    pub correlation: Option<f64>,
    pub beta: Option<f64>,
    pub counts: Option<TradingDayCounts>,
}

/// Everything the statistics panel shows for one selection.
///
/// A scalar is `None` when its statistic is undefined for the selection
/// (no rows, a single row, a flat benchmark). `benchmark` is `None` when no
/// benchmark is selected, never filled with placeholder numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    pub ticker: String,
    pub mean_daily_return: Option<f64>,
    pub variance_daily_return: Option<f64>,
    pub mean_volume: Option<f64>,
    pub etl_5pct: Option<f64>,
    /// Rows of the primary slice, or the shared days when a benchmark is selected.
    pub trading_day_count: usize,
    pub benchmark: Option<BenchmarkStats>,
}

impl StatsResult {
    /// A result with every statistic blank.
    pub fn blank(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            mean_daily_return: None,
            variance_daily_return: None,
            mean_volume: None,
            etl_5pct: None,
            trading_day_count: 0,
            benchmark: None,
        }
    }
}
