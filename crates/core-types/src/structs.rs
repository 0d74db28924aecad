use crate::enums::Field;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for one ticker.
///
/// `daily_return_pct` is fixed at load time as `(close - open) / open * 100`
/// (or taken verbatim from the source) and never recomputed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub daily_return_pct: f64,
}

impl Observation {
    /// Builds an observation, deriving the daily return from open and close.
    pub fn new(
        ticker: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
            daily_return_pct: (close - open) / open * 100.0,
        }
    }

    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
            Field::DailyReturnPct => self.daily_return_pct,
        }
    }
}

/// An inclusive `[start, end]` window of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CoreError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The observations of a single ticker, ascending by date with no duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub ticker: String,
    pub observations: Vec<Observation>,
}

impl Series {
    /// Wraps already-ordered observations. The dataset store is the only place
    /// rows are ordered and de-duplicated; callers building series by hand must
    /// uphold the same ordering.
    pub fn new(ticker: impl Into<String>, observations: Vec<Observation>) -> Self {
        debug_assert!(observations.windows(2).all(|w| w[0].date < w[1].date));
        Self {
            ticker: ticker.into(),
            observations,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Copies one numeric column out of the series.
    pub fn column(&self, field: Field) -> Vec<f64> {
        self.observations.iter().map(|o| o.value(field)).collect()
    }

    pub fn returns(&self) -> Vec<f64> {
        self.column(Field::DailyReturnPct)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Two series reduced to the dates they share.
///
/// Row `i` of `primary` and row `i` of `benchmark` always describe the same
/// calendar date when the pair was built through [`AlignedPair::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub primary: Series,
    pub benchmark: Series,
}

impl AlignedPair {
    /// Checked constructor: fails if the two sides disagree on length or dates.
    pub fn new(primary: Series, benchmark: Series) -> Result<Self, CoreError> {
        let pair = Self::from_unchecked(primary, benchmark);
        pair.verify()?;
        Ok(pair)
    }

    /// Assembles a pair without checking alignment. Statistics re-verify
    /// before they read the columns.
    pub fn from_unchecked(primary: Series, benchmark: Series) -> Self {
        Self { primary, benchmark }
    }

    pub fn empty(primary: impl Into<String>, benchmark: impl Into<String>) -> Self {
        Self::from_unchecked(Series::empty(primary), Series::empty(benchmark))
    }

    pub fn verify(&self) -> Result<(), CoreError> {
        if self.primary.len() != self.benchmark.len() {
            return Err(CoreError::Unaligned(format!(
                "{} has {} rows but {} has {}",
                self.primary.ticker,
                self.primary.len(),
                self.benchmark.ticker,
                self.benchmark.len()
            )));
        }
        if let Some((p, b)) = self
            .primary
            .iter()
            .zip(self.benchmark.iter())
            .find(|(p, b)| p.date != b.date)
        {
            return Err(CoreError::Unaligned(format!(
                "row dates differ: {} vs {}",
                p.date, b.date
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.primary.dates()
    }

    /// The pair with primary and benchmark exchanged.
    pub fn swap(self) -> Self {
        Self {
            primary: self.benchmark,
            benchmark: self.primary,
        }
    }

    /// `(primary, benchmark)` row pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&Observation, &Observation)> {
        self.primary.iter().zip(self.benchmark.iter())
    }
}
