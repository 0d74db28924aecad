use crate::error::DatasetError;
use chrono::NaiveDate;
use core_types::{DateRange, Observation};
use std::collections::BTreeMap;

/// The full, immutable price history for every ticker.
///
/// Built once at startup and shared behind an `Arc`. Each ticker owns a
/// date-sorted vector so range queries are two binary searches.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    by_ticker: BTreeMap<String, Vec<Observation>>,
    bounds: DateRange,
    row_count: usize,
}

impl DatasetStore {
    /// Indexes observations by ticker and date.
    ///
    /// Rows may arrive in any order. Two rows for the same ticker and date are
    /// rejected, as is an empty input.
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self, DatasetError> {
        let row_count = observations.len();
        let mut by_ticker: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
        for observation in observations {
            by_ticker
                .entry(observation.ticker.clone())
                .or_default()
                .push(observation);
        }

        let mut min_date: Option<NaiveDate> = None;
        let mut max_date: Option<NaiveDate> = None;
        for (ticker, rows) in by_ticker.iter_mut() {
            rows.sort_by_key(|o| o.date);
            if let Some(pair) = rows.windows(2).find(|w| w[0].date == w[1].date) {
                return Err(DatasetError::DuplicateDate {
                    ticker: ticker.clone(),
                    date: pair[0].date,
                });
            }
            // Non-empty by construction of the map.
            let (first, last) = (rows[0].date, rows[rows.len() - 1].date);
            min_date = Some(min_date.map_or(first, |d| d.min(first)));
            max_date = Some(max_date.map_or(last, |d| d.max(last)));
        }

        let (Some(start), Some(end)) = (min_date, max_date) else {
            return Err(DatasetError::Empty);
        };
        let bounds = DateRange::new(start, end).map_err(|_| DatasetError::Empty)?;

        Ok(Self {
            by_ticker,
            bounds,
            row_count,
        })
    }

    /// All tickers, sorted.
    pub fn tickers(&self) -> Vec<&str> {
        self.by_ticker.keys().map(String::as_str).collect()
    }

    pub fn contains_ticker(&self, ticker: &str) -> bool {
        self.by_ticker.contains_key(ticker)
    }

    /// Global first and last trading day across every ticker. This is also
    /// the range used when the caller has not picked one.
    pub fn date_bounds(&self) -> DateRange {
        self.bounds
    }

    /// Total number of observations.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Every row of one ticker, ascending by date. Unknown tickers yield an empty slice.
    pub fn rows(&self, ticker: &str) -> &[Observation] {
        self.by_ticker.get(ticker).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(ticker: &str, day: u32) -> Observation {
        let date = NaiveDate::from_ymd_opt(2022, 5, day).unwrap();
        Observation::new(ticker, date, 10.0, 11.0, 9.0, 10.5, 100.0)
    }

    #[test]
    fn tracks_bounds_across_tickers() {
        let store = DatasetStore::from_observations(vec![obs("BBB", 9), obs("AAA", 3), obs("AAA", 5)]).unwrap();
        let bounds = store.date_bounds();
        assert_eq!(bounds.start().to_string(), "2022-05-03");
        assert_eq!(bounds.end().to_string(), "2022-05-09");
        assert!(store.contains_ticker("BBB"));
        assert!(!store.contains_ticker("CCC"));
        assert!(store.rows("CCC").is_empty());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(DatasetStore::from_observations(vec![]), Err(DatasetError::Empty)));
    }

    #[test]
    fn rejects_duplicate_ticker_dates() {
        let err = DatasetStore::from_observations(vec![obs("AAA", 3), obs("AAA", 3)]).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateDate { ref ticker, .. } if ticker == "AAA"));
    }
}
