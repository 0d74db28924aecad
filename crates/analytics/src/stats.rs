//! Pure statistics over sliced and aligned series.
//!
//! Every function here is total over well-formed input and returns a typed
//! [`StatsError`] otherwise. Results are full precision; rounding for display
//! happens in the presentation layer.

use crate::error::StatsError;
use crate::report::TradingDayCounts;
use core_types::{AlignedPair, Field, Series};

/// Share of the worst returns averaged by [`expected_tail_loss_5pct`].
pub const TAIL_FRACTION_5PCT: f64 = 0.05;

/// Arithmetic mean of `field` over every row.
pub fn mean(series: &Series, field: Field) -> Result<f64, StatsError> {
    let values = non_empty_column(series, field)?;
    Ok(mean_of_values(&values))
}

/// [`mean`] with the field given by column name, e.g. `"Daily Returns %"`.
pub fn mean_of(series: &Series, column: &str) -> Result<f64, StatsError> {
    mean(series, column.parse::<Field>()?)
}

/// Population variance (denominator N) of `field`.
pub fn variance(series: &Series, field: Field) -> Result<f64, StatsError> {
    let values = non_empty_column(series, field)?;
    Ok(population_variance(&values))
}

/// [`variance`] with the field given by column name.
pub fn variance_of(series: &Series, column: &str) -> Result<f64, StatsError> {
    variance(series, column.parse::<Field>()?)
}

/// Mean of the worst 5% of daily returns (left tail).
///
/// The tail holds `ceil(N / 20)` rows, so any non-empty series has a tail of
/// at least one row.
pub fn expected_tail_loss_5pct(series: &Series) -> Result<f64, StatsError> {
    let n = series.len();
    if n == 0 {
        return Err(empty(series, "expected tail loss"));
    }
    Ok(worst_mean(series.returns(), n.div_ceil(20)))
}

/// Mean of the worst `tail_fraction` of daily returns, for `0 < tail_fraction <= 1`.
pub fn expected_tail_loss(series: &Series, tail_fraction: f64) -> Result<f64, StatsError> {
    if !(tail_fraction > 0.0 && tail_fraction <= 1.0) {
        return Err(StatsError::InvalidParameter(format!(
            "tail fraction must be in (0, 1], got {tail_fraction}"
        )));
    }
    let n = series.len();
    if n == 0 {
        return Err(empty(series, "expected tail loss"));
    }
    Ok(worst_mean(series.returns(), tail_size(n, tail_fraction)))
}

/// Population covariance of the two daily-return columns.
pub fn covariance(pair: &AlignedPair) -> Result<f64, StatsError> {
    let (x, y) = aligned_returns(pair)?;
    if x.is_empty() {
        return Err(StatsError::EmptyInput(format!(
            "{} and {} share no trading days",
            pair.primary.ticker, pair.benchmark.ticker
        )));
    }
    if x.len() < 2 {
        return Err(StatsError::InsufficientData("covariance".to_string()));
    }
    Ok(population_covariance(&x, &y))
}

/// Pearson correlation of the two daily-return columns.
pub fn correlation(pair: &AlignedPair) -> Result<f64, StatsError> {
    let (x, y) = aligned_returns(pair)?;
    let insufficient = || StatsError::InsufficientData("correlation".to_string());
    if x.len() < 2 || is_constant(&x) || is_constant(&y) {
        return Err(insufficient());
    }
    let scale = population_variance(&x).sqrt() * population_variance(&y).sqrt();
    let r = population_covariance(&x, &y) / scale;
    // Variances of tiny but distinct values can underflow to zero.
    if scale == 0.0 || !r.is_finite() {
        return Err(insufficient());
    }
    // Rounding can push a perfect co-movement a hair past one.
    Ok(r.clamp(-1.0, 1.0))
}

/// Sensitivity of the primary's returns to the benchmark's:
/// `cov(primary, benchmark) / var(benchmark)`.
pub fn beta(pair: &AlignedPair) -> Result<f64, StatsError> {
    let (x, y) = aligned_returns(pair)?;
    let insufficient = || StatsError::InsufficientData("beta".to_string());
    if x.len() < 2 || is_constant(&y) {
        return Err(insufficient());
    }
    let benchmark_variance = population_variance(&y);
    let b = population_covariance(&x, &y) / benchmark_variance;
    if benchmark_variance == 0.0 || !b.is_finite() {
        return Err(insufficient());
    }
    Ok(b)
}

/// Classifies every shared trading day by the sign of both daily returns.
///
/// A return of exactly zero counts as "down or flat".
pub fn trading_day_counts(pair: &AlignedPair) -> Result<TradingDayCounts, StatsError> {
    pair.verify()?;
    let mut counts = TradingDayCounts {
        total: pair.len(),
        ..TradingDayCounts::default()
    };
    for (p, b) in pair.rows() {
        match (p.daily_return_pct > 0.0, b.daily_return_pct > 0.0) {
            (true, true) => counts.both_up += 1,
            (false, false) => counts.both_down_or_flat += 1,
            (true, false) => counts.primary_up_benchmark_down += 1,
            (false, true) => counts.primary_down_benchmark_up += 1,
        }
    }
    debug_assert!(counts.is_partition());
    Ok(counts)
}

/// Number of trading days when no benchmark is selected.
pub fn trading_day_count_single(series: &Series) -> usize {
    series.len()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn empty(series: &Series, what: &str) -> StatsError {
    StatsError::EmptyInput(format!("no rows for {} to compute {what}", series.ticker))
}

fn non_empty_column(series: &Series, field: Field) -> Result<Vec<f64>, StatsError> {
    if series.is_empty() {
        return Err(empty(series, &format!("statistics of '{field}'")));
    }
    Ok(series.column(field))
}

fn aligned_returns(pair: &AlignedPair) -> Result<(Vec<f64>, Vec<f64>), StatsError> {
    pair.verify()?;
    Ok((pair.primary.returns(), pair.benchmark.returns()))
}

fn mean_of_values(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64]) -> f64 {
    let m = mean_of_values(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

fn population_covariance(x: &[f64], y: &[f64]) -> f64 {
    let (mx, my) = (mean_of_values(x), mean_of_values(y));
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum::<f64>()
        / x.len() as f64
}

/// True when every value equals the first, i.e. the variance is exactly zero
/// even if floating-point summation would leave a tiny residue.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// `ceil(n * fraction)`, clamped to `1..=n`. Products that land within rounding
/// noise of an integer are not bumped up (e.g. `60 * 0.05` is three rows, not four).
fn tail_size(n: usize, fraction: f64) -> usize {
    let raw = n as f64 * fraction;
    let k = if (raw - raw.round()).abs() < 1e-9 {
        raw.round()
    } else {
        raw.ceil()
    };
    (k as usize).clamp(1, n)
}

fn worst_mean(mut returns: Vec<f64>, k: usize) -> f64 {
    returns.sort_by(f64::total_cmp);
    mean_of_values(&returns[..k])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Observation;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn series_from_returns(ticker: &str, returns: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let observations = returns
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let date = start + chrono::Days::new(i as u64);
                let mut o = Observation::new(ticker, date, 100.0, 101.0, 99.0, 100.0, 1_000.0 + i as f64);
                o.daily_return_pct = *r;
                o
            })
            .collect();
        Series::new(ticker, observations)
    }

    fn pair(primary: &[f64], benchmark: &[f64]) -> AlignedPair {
        AlignedPair::new(series_from_returns("AAA", primary), series_from_returns("BBB", benchmark)).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn mean_and_population_variance() {
        let s = series_from_returns("AAA", &[1.0, 2.0, 3.0, 4.0]);
        assert_close(mean(&s, Field::DailyReturnPct).unwrap(), 2.5);
        assert_close(variance(&s, Field::DailyReturnPct).unwrap(), 1.25);
        assert_close(mean_of(&s, "Volume").unwrap(), 1_001.5);
    }

    #[test]
    fn empty_series_is_rejected() {
        let s = series_from_returns("AAA", &[]);
        assert!(matches!(mean(&s, Field::Close), Err(StatsError::EmptyInput(_))));
        assert!(matches!(variance(&s, Field::DailyReturnPct), Err(StatsError::EmptyInput(_))));
        assert!(matches!(expected_tail_loss_5pct(&s), Err(StatsError::EmptyInput(_))));
        assert_eq!(trading_day_count_single(&s), 0);
    }

    #[test]
    fn unknown_or_non_numeric_fields_are_rejected() {
        let s = series_from_returns("AAA", &[1.0]);
        assert!(matches!(mean_of(&s, "Adj Close"), Err(StatsError::InvalidField(_))));
        assert!(matches!(variance_of(&s, "Ticker"), Err(StatsError::InvalidField(_))));
    }

    #[test]
    fn tail_loss_of_ten_days_is_the_single_worst_return() {
        let s = series_from_returns("AAA", &[-5.0, -3.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_close(expected_tail_loss_5pct(&s).unwrap(), -5.0);
    }

    #[test]
    fn tail_loss_uses_ceiling_of_five_percent() {
        // 21 rows -> ceil(1.05) = 2 worst values, given out of order.
        let mut returns: Vec<f64> = (0..19).map(|i| i as f64).collect();
        returns.insert(7, -4.0);
        returns.push(-2.0);
        let s = series_from_returns("AAA", &returns);
        assert_close(expected_tail_loss_5pct(&s).unwrap(), -3.0);
        assert_close(expected_tail_loss(&s, TAIL_FRACTION_5PCT).unwrap(), -3.0);
    }

    #[test]
    fn tail_size_ignores_rounding_noise() {
        assert_eq!(tail_size(60, 0.05), 3);
        assert_eq!(tail_size(61, 0.05), 4);
        assert_eq!(tail_size(1, 0.05), 1);
        assert_eq!(tail_size(10, 1.0), 10);
        for n in 1..500 {
            assert_eq!(tail_size(n, TAIL_FRACTION_5PCT), n.div_ceil(20));
        }
    }

    #[test]
    fn tail_fraction_outside_unit_interval_is_rejected() {
        let s = series_from_returns("AAA", &[1.0]);
        assert!(matches!(expected_tail_loss(&s, 0.0), Err(StatsError::InvalidParameter(_))));
        assert!(matches!(expected_tail_loss(&s, 1.5), Err(StatsError::InvalidParameter(_))));
    }

    #[test]
    fn covariance_correlation_and_beta() {
        let p = pair(&[2.0, 4.0, 6.0], &[1.0, 2.0, 3.0]);
        // var(b) = 2/3, cov = 4/3
        assert_close(covariance(&p).unwrap(), 4.0 / 3.0);
        assert_close(correlation(&p).unwrap(), 1.0);
        assert_close(beta(&p).unwrap(), 2.0);

        let inverse = pair(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert_close(correlation(&inverse).unwrap(), -1.0);
    }

    #[test]
    fn co_movement_needs_two_days() {
        let none = pair(&[], &[]);
        assert!(matches!(covariance(&none), Err(StatsError::EmptyInput(_))));
        assert!(matches!(correlation(&none), Err(StatsError::InsufficientData(_))));

        let one = pair(&[1.0], &[2.0]);
        assert!(matches!(covariance(&one), Err(StatsError::InsufficientData(_))));
        assert!(matches!(correlation(&one), Err(StatsError::InsufficientData(_))));
        assert!(matches!(beta(&one), Err(StatsError::InsufficientData(_))));
    }

    #[test]
    fn zero_variance_benchmark_is_insufficient() {
        let flat = pair(&[1.0, -2.0, 3.0], &[0.1, 0.1, 0.1]);
        assert!(matches!(correlation(&flat), Err(StatsError::InsufficientData(_))));
        assert!(matches!(beta(&flat), Err(StatsError::InsufficientData(_))));
        assert!(covariance(&flat).is_ok());
    }

    #[test]
    fn underflowing_benchmark_variance_is_insufficient() {
        let tiny = pair(&[1.0, 2.0, 3.0], &[1e-200, 2e-200, 3e-200]);
        assert!(matches!(beta(&tiny), Err(StatsError::InsufficientData(_))));
        assert!(matches!(correlation(&tiny), Err(StatsError::InsufficientData(_))));
    }

    #[test]
    fn mismatched_pair_is_unaligned() {
        let broken = AlignedPair::from_unchecked(
            series_from_returns("AAA", &[1.0, 2.0, 3.0]),
            series_from_returns("BBB", &[1.0, 2.0]),
        );
        assert!(matches!(covariance(&broken), Err(StatsError::UnalignedData(_))));
        assert!(matches!(correlation(&broken), Err(StatsError::UnalignedData(_))));
        assert!(matches!(beta(&broken), Err(StatsError::UnalignedData(_))));
        assert!(matches!(trading_day_counts(&broken), Err(StatsError::UnalignedData(_))));
    }

    #[test]
    fn trading_day_counts_classify_by_sign() {
        let p = pair(&[1.0, -1.0, 0.0, 2.0, -3.0], &[0.5, -0.5, 1.0, 0.0, 0.0]);
        let counts = trading_day_counts(&p).unwrap();
        assert_eq!(
            counts,
            TradingDayCounts {
                total: 5,
                both_up: 1,
                both_down_or_flat: 2,
                primary_up_benchmark_down: 1,
                primary_down_benchmark_up: 1,
            }
        );
        assert!(counts.is_partition());
    }

    #[test]
    fn beta_against_itself_is_one() {
        let s = series_from_returns("AAA", &[0.3, -1.2, 2.5, 0.0, -0.7]);
        let p = AlignedPair::new(s.clone(), s).unwrap();
        assert_close(beta(&p).unwrap(), 1.0);
        assert_close(correlation(&p).unwrap(), 1.0);
    }

    #[test]
    fn randomized_properties_hold() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.random_range(2..120);
            let x: Vec<f64> = (0..n).map(|_| rng.random_range(-8.0..8.0)).collect();
            let y: Vec<f64> = (0..n).map(|_| rng.random_range(-8.0..8.0)).collect();
            let p = pair(&x, &y);

            let s = &p.primary;
            assert!(variance(s, Field::DailyReturnPct).unwrap() >= 0.0);

            let r = correlation(&p).unwrap();
            assert!((-1.0..=1.0).contains(&r), "correlation {r} out of bounds");

            let counts = trading_day_counts(&p).unwrap();
            assert_eq!(counts.total, n);
            assert!(counts.is_partition());

            let self_pair = AlignedPair::new(s.clone(), s.clone()).unwrap();
            assert_close(beta(&self_pair).unwrap(), 1.0);

            if x.iter().any(|v| *v < 0.0) {
                let etl = expected_tail_loss_5pct(s).unwrap();
                let avg = mean(s, Field::DailyReturnPct).unwrap();
                assert!(etl <= avg, "tail loss {etl} above mean {avg}");
            }
        }
    }
}
