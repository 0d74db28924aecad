use crate::error::StatsError;
use crate::report::{BenchmarkStats, StatsResult};
use crate::stats;
use core_types::{AlignedPair, Field, Series};

/// A stateless calculator that fills a [`StatsResult`] for one selection.
///
/// Each statistic is computed independently. A failure is logged and leaves
/// only that field blank, so one undefined statistic never hides the others.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes the primary slice and, when given, the aligned benchmark pair.
    ///
    /// # Arguments
    ///
    /// * `series` - The primary ticker sliced to the selected range.
    /// * `pair` - The primary and benchmark inner-joined over the same range,
    ///   or `None` when no benchmark is selected.
    pub fn summarize(&self, series: &Series, pair: Option<&AlignedPair>) -> StatsResult {
        let ticker = series.ticker.as_str();

        let mut result = StatsResult {
            ticker: ticker.to_string(),
            mean_daily_return: keep(ticker, "mean daily return", stats::mean(series, Field::DailyReturnPct)),
            variance_daily_return: keep(
                ticker,
                "variance of daily return",
                stats::variance(series, Field::DailyReturnPct),
            ),
            mean_volume: keep(ticker, "mean volume", stats::mean(series, Field::Volume)),
            etl_5pct: keep(ticker, "expected tail loss", stats::expected_tail_loss_5pct(series)),
            trading_day_count: stats::trading_day_count_single(series),
            benchmark: None,
        };

        if let Some(pair) = pair {
            let counts = keep(ticker, "trading day counts", stats::trading_day_counts(pair));
            result.trading_day_count = counts.map_or(pair.len(), |c| c.total);
            result.benchmark = Some(BenchmarkStats {
                ticker: pair.benchmark.ticker.clone(),
                covariance: keep(ticker, "covariance", stats::covariance(pair)),
                correlation: keep(ticker, "correlation", stats::correlation(pair)),
                beta: keep(ticker, "beta", stats::beta(pair)),
                counts,
            });
        }

        tracing::debug!(?result, "Statistics computed.");
        result
    }
}

/// Turns a failed statistic into a blank value.
fn keep<T>(ticker: &str, metric: &str, outcome: Result<T, StatsError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(ticker, metric, %error, "Statistic unavailable, rendering blank.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Observation;

    fn series(ticker: &str, returns: &[f64]) -> Series {
        let observations = returns
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let date = NaiveDate::from_ymd_opt(2022, 6, 1 + i as u32).unwrap();
                let mut o = Observation::new(ticker, date, 10.0, 10.0, 10.0, 10.0, 200.0);
                o.daily_return_pct = *r;
                o
            })
            .collect();
        Series::new(ticker, observations)
    }

    #[test]
    fn without_benchmark_only_single_asset_fields_are_set() {
        let s = series("AAA", &[-1.0, 2.0, 0.5]);
        let result = AnalyticsEngine::new().summarize(&s, None);

        assert!(result.mean_daily_return.is_some());
        assert!(result.variance_daily_return.is_some());
        assert_eq!(result.mean_volume, Some(200.0));
        assert_eq!(result.etl_5pct, Some(-1.0));
        assert_eq!(result.trading_day_count, 3);
        assert!(result.benchmark.is_none());
    }

    #[test]
    fn with_benchmark_counts_shared_days() {
        let a = series("AAA", &[1.0, -1.0, 2.0, 0.0]);
        let b = series("BBB", &[0.5, 0.5, -0.5, -0.5]);
        let pair = AlignedPair::new(a.clone(), b).unwrap();
        let result = AnalyticsEngine::new().summarize(&a, Some(&pair));

        let bench = result.benchmark.expect("benchmark stats");
        assert_eq!(bench.ticker, "BBB");
        assert!(bench.covariance.is_some());
        assert!(bench.correlation.is_some());
        assert!(bench.beta.is_some());
        let counts = bench.counts.unwrap();
        assert_eq!(counts.total, 4);
        assert_eq!(counts.both_up, 1);
        assert_eq!(counts.both_down_or_flat, 1);
        assert_eq!(counts.primary_up_benchmark_down, 1);
        assert_eq!(counts.primary_down_benchmark_up, 1);
        assert_eq!(result.trading_day_count, 4);
    }

    #[test]
    fn empty_selection_renders_blank_without_failing() {
        let s = series("AAA", &[]);
        let pair = AlignedPair::empty("AAA", "BBB");
        let result = AnalyticsEngine::new().summarize(&s, Some(&pair));

        assert_eq!(result.mean_daily_return, None);
        assert_eq!(result.variance_daily_return, None);
        assert_eq!(result.mean_volume, None);
        assert_eq!(result.etl_5pct, None);
        assert_eq!(result.trading_day_count, 0);
        let bench = result.benchmark.unwrap();
        assert_eq!(bench.covariance, None);
        assert_eq!(bench.correlation, None);
        assert_eq!(bench.beta, None);
        assert_eq!(bench.counts.map(|c| c.total), Some(0));
    }

    #[test]
    fn one_bad_statistic_does_not_hide_the_rest() {
        let a = series("AAA", &[1.0, -2.0, 3.0]);
        let flat = series("BBB", &[0.2, 0.2, 0.2]);
        let pair = AlignedPair::new(a.clone(), flat).unwrap();
        let result = AnalyticsEngine::new().summarize(&a, Some(&pair));

        let bench = result.benchmark.unwrap();
        assert!(bench.covariance.is_some());
        assert_eq!(bench.correlation, None);
        assert_eq!(bench.beta, None);
        assert!(result.mean_daily_return.is_some());
    }
}
