use crate::store::DatasetStore;
use core_types::{AlignedPair, DateRange, Series};
use std::cmp::Ordering;

impl DatasetStore {
    /// Rows of `ticker` whose date falls inside `range`, ascending by date.
    ///
    /// An unknown ticker or a range with no trading days yields an empty
    /// series; emptiness is a value here, not an error.
    pub fn slice(&self, ticker: &str, range: &DateRange) -> Series {
        let rows = self.rows(ticker);
        let lo = rows.partition_point(|o| o.date < range.start());
        let hi = rows.partition_point(|o| o.date <= range.end());
        tracing::debug!(ticker, start = %range.start(), end = %range.end(), rows = hi - lo, "Sliced series.");
        Series::new(ticker, rows[lo..hi].to_vec())
    }

    /// Slices both tickers over `range` and keeps only their common dates.
    pub fn align(&self, ticker: &str, benchmark: &str, range: &DateRange) -> AlignedPair {
        let primary = self.slice(ticker, range);
        let benchmark = self.slice(benchmark, range);
        align_series(&primary, &benchmark)
    }
}

/// Inner-joins two date-sorted series on exact calendar date.
///
/// Both inputs are walked once; the output sides have identical dates row by row.
pub fn align_series(primary: &Series, benchmark: &Series) -> AlignedPair {
    let mut left = Vec::new();
    let mut right = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < primary.len() && j < benchmark.len() {
        let (p, b) = (&primary.observations[i], &benchmark.observations[j]);
        match p.date.cmp(&b.date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                left.push(p.clone());
                right.push(b.clone());
                i += 1;
                j += 1;
            }
        }
    }

    let pair = AlignedPair::from_unchecked(
        Series::new(primary.ticker.clone(), left),
        Series::new(benchmark.ticker.clone(), right),
    );
    debug_assert!(pair.verify().is_ok());
    pair
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Observation;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, d).unwrap()
    }

    fn obs(ticker: &str, d: u32, ret: f64) -> Observation {
        let mut o = Observation::new(ticker, date(d), 100.0, 101.0, 99.0, 100.0, 1_000.0);
        o.daily_return_pct = ret;
        o
    }

    fn store() -> DatasetStore {
        DatasetStore::from_observations(vec![
            obs("AAA", 3, 1.0),
            obs("AAA", 4, -2.0),
            obs("AAA", 5, 0.5),
            obs("AAA", 7, 3.0),
            obs("BBB", 4, 0.1),
            obs("BBB", 5, -0.3),
            obs("BBB", 6, 0.2),
            obs("BBB", 7, 0.4),
        ])
        .unwrap()
    }

    #[test]
    fn slice_is_inclusive_on_both_ends() {
        let store = store();
        let range = DateRange::new(date(4), date(7)).unwrap();
        let series = store.slice("AAA", &range);
        assert_eq!(series.dates(), vec![date(4), date(5), date(7)]);
        assert_eq!(series.ticker, "AAA");
    }

    #[test]
    fn slice_of_unknown_ticker_or_empty_range_is_empty() {
        let store = store();
        assert!(store.slice("ZZZ", &store.date_bounds()).is_empty());

        // Starts after the last trading day in the store.
        let after = DateRange::new(date(20), date(25)).unwrap();
        assert!(store.slice("AAA", &after).is_empty());

        // Falls between two trading days.
        assert!(store.slice("AAA", &DateRange::day(date(6))).is_empty());
    }

    #[test]
    fn align_keeps_only_common_dates() {
        let store = store();
        let pair = store.align("AAA", "BBB", &store.date_bounds());
        assert_eq!(pair.dates(), vec![date(4), date(5), date(7)]);
        assert_eq!(pair.primary.returns(), vec![-2.0, 0.5, 3.0]);
        assert_eq!(pair.benchmark.returns(), vec![0.1, -0.3, 0.4]);
        assert!(pair.verify().is_ok());
    }

    #[test]
    fn align_with_missing_side_is_empty() {
        let store = store();
        let pair = store.align("AAA", "ZZZ", &store.date_bounds());
        assert!(pair.is_empty());
        assert_eq!(pair.benchmark.ticker, "ZZZ");
    }

    #[test]
    fn align_with_itself_is_identity() {
        let store = store();
        let pair = store.align("AAA", "AAA", &store.date_bounds());
        assert_eq!(pair.len(), 4);
        assert_eq!(pair.primary, pair.benchmark);
    }

    #[test]
    fn align_is_symmetric_for_random_calendars() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut rows = Vec::new();
            for d in 1..=28 {
                if rng.random_bool(0.7) {
                    rows.push(obs("AAA", d, rng.random_range(-5.0..5.0)));
                }
                if rng.random_bool(0.7) {
                    rows.push(obs("BBB", d, rng.random_range(-5.0..5.0)));
                }
            }
            if rows.is_empty() {
                continue;
            }
            let store = DatasetStore::from_observations(rows).unwrap();
            let range = store.date_bounds();
            let forward = store.align("AAA", "BBB", &range);
            let backward = store.align("BBB", "AAA", &range);

            assert_eq!(forward.len(), backward.len());
            assert_eq!(forward.dates(), backward.dates());
            assert_eq!(forward.primary, backward.benchmark);
            assert_eq!(forward.clone().swap(), backward);
        }
    }
}
