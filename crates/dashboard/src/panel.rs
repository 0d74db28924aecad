use analytics::StatsResult;
use rust_decimal::prelude::*;
use serde::Serialize;

/// Rounds a statistic for display, half to even.
///
/// Non-finite values have no decimal form and come back as `None`.
pub fn round_dp(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(dp).normalize())
}

/// [`round_dp`] back to a float, for chart payloads.
pub(crate) fn round_f64(value: f64, dp: u32) -> Option<f64> {
    round_dp(value, dp).and_then(|d| d.to_f64())
}

fn cell(value: Option<f64>, dp: u32) -> String {
    value
        .and_then(|v| round_dp(v, dp))
        .map(|d| d.to_string())
        .unwrap_or_default()
}

/// One line of the statistics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub label: &'static str,
    /// Display-ready value; empty when the statistic is unavailable.
    pub value: String,
}

/// The statistics table, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsPanel {
    pub rows: Vec<PanelRow>,
}

impl StatsPanel {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

impl From<&StatsResult> for StatsPanel {
    fn from(result: &StatsResult) -> Self {
        let bench = result.benchmark.as_ref();
        let counts = bench.and_then(|b| b.counts);
        let count = |pick: fn(&analytics::TradingDayCounts) -> usize| {
            counts.as_ref().map(|c| pick(c).to_string()).unwrap_or_default()
        };

        let rows = vec![
            PanelRow { label: "Ticker", value: result.ticker.clone() },
            PanelRow { label: "Mean Daily Return %", value: cell(result.mean_daily_return, 2) },
            PanelRow { label: "Var Daily Return %", value: cell(result.variance_daily_return, 4) },
            PanelRow { label: "Mean Volume", value: cell(result.mean_volume, 0) },
            PanelRow { label: "ETL 5%", value: cell(result.etl_5pct, 2) },
            PanelRow {
                label: "Benchmark",
                value: bench.map(|b| b.ticker.clone()).unwrap_or_default(),
            },
            PanelRow { label: "Covariance", value: cell(bench.and_then(|b| b.covariance), 4) },
            PanelRow { label: "Correlation", value: cell(bench.and_then(|b| b.correlation), 4) },
            PanelRow { label: "Beta", value: cell(bench.and_then(|b| b.beta), 4) },
            PanelRow { label: "Days Traded", value: result.trading_day_count.to_string() },
            PanelRow { label: "Count - both stocks closed high", value: count(|c| c.both_up) },
            PanelRow {
                label: "Count - both stocks closed low or even",
                value: count(|c| c.both_down_or_flat),
            },
            PanelRow {
                label: "Count - stock closed high, benchmark low",
                value: count(|c| c.primary_up_benchmark_down),
            },
            PanelRow {
                label: "Count - stock closed low, benchmark high",
                value: count(|c| c.primary_down_benchmark_up),
            },
        ];

        Self { rows }
    }
}
