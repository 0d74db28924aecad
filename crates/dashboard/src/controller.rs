use crate::charts::{self, Chart, HistogramChart, LineChart};
use crate::panel::StatsPanel;
use crate::range::ChartTab;
use analytics::{AnalyticsEngine, StatsResult};
use chrono::NaiveDate;
use core_types::{AlignedPair, CoreError, DateRange, Series};
use dataset::DatasetStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the user has picked: a ticker, an optional benchmark and a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub ticker: String,
    /// May equal `ticker`; the pair then compares the ticker with itself.
    pub benchmark: Option<String>,
    /// `None` means the whole dataset.
    pub range: Option<DateRange>,
}

impl Selection {
    pub fn ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            benchmark: None,
            range: None,
        }
    }

    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = Some(benchmark.into());
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// An entry of the benchmark dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerOption {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

/// The slices one selection needs, taken once and shared by every view.
struct Slices {
    primary: Series,
    /// The benchmark sliced on its own, with no join.
    benchmark: Option<Series>,
    pair: Option<AlignedPair>,
}

/// Read-only view layer over the shared store.
///
/// Every method takes a [`Selection`] and recomputes from the store, so a
/// `Dashboard` can be cloned freely and shared between request handlers.
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: Arc<DatasetStore>,
    engine: AnalyticsEngine,
}

impl Dashboard {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self {
            store,
            engine: AnalyticsEngine::new(),
        }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.store.tickers()
    }

    /// The first ticker alphabetically, preselected on load.
    pub fn default_ticker(&self) -> Option<&str> {
        self.store.tickers().first().copied()
    }

    pub fn date_bounds(&self) -> DateRange {
        self.store.date_bounds()
    }

    /// Completes a range where either end may be missing.
    ///
    /// A missing end is taken from the dataset bounds, clamped so it never lands
    /// on the wrong side of the given one. A start past the last trading day
    /// therefore yields an empty range rather than an error. Both ends missing means no explicit range.
    pub fn partial_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<DateRange>, CoreError> {
        let bounds = self.store.date_bounds();
        let range = match (start, end) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => DateRange::new(start, end)?,
            (Some(start), None) => DateRange::new(start, bounds.end().max(start))?,
            (None, Some(end)) => DateRange::new(bounds.start().min(end), end)?,
        };
        Ok(Some(range))
    }

    pub fn resolve_range(&self, selection: &Selection) -> DateRange {
        selection.range.unwrap_or_else(|| self.store.date_bounds())
    }

    fn slices(&self, selection: &Selection) -> Slices {
        let range = self.resolve_range(selection);
        let primary = self.store.slice(&selection.ticker, &range);

        let (benchmark, pair) = match &selection.benchmark {
            Some(benchmark) => {
                let own = self.store.slice(benchmark, &range);
                let pair = dataset::align_series(&primary, &own);
                (Some(own), Some(pair))
            }
            None => (None, None),
        };

        tracing::debug!(
            ticker = %selection.ticker,
            benchmark = ?selection.benchmark,
            start = %range.start(),
            end = %range.end(),
            rows = primary.len(),
            "Selection sliced."
        );

        Slices { primary, benchmark, pair }
    }

    pub fn stats(&self, selection: &Selection) -> StatsResult {
        let slices = self.slices(selection);
        self.engine.summarize(&slices.primary, slices.pair.as_ref())
    }

    pub fn panel(&self, selection: &Selection) -> StatsPanel {
        StatsPanel::from(&self.stats(selection))
    }

    /// Every ticker, with the primary greyed out rather than removed.
    pub fn benchmark_options(&self, primary: &str) -> Vec<TickerOption> {
        self.store
            .tickers()
            .into_iter()
            .map(|ticker| TickerOption {
                label: ticker.to_string(),
                value: ticker.to_string(),
                disabled: ticker == primary,
            })
            .collect()
    }

    /// Candles for the primary ticker only; a benchmark does not change them.
    pub fn candlestick(&self, selection: &Selection) -> charts::CandlestickChart {
        let range = self.resolve_range(selection);
        charts::candlestick(&self.store.slice(&selection.ticker, &range))
    }

    pub fn price_line(&self, selection: &Selection) -> LineChart {
        let slices = self.slices(selection);
        match &slices.pair {
            Some(pair) => charts::rebased_price_line(pair),
            None => charts::price_line(&slices.primary),
        }
    }

    pub fn returns_line(&self, selection: &Selection) -> LineChart {
        let slices = self.slices(selection);
        let primary_etl = analytics::expected_tail_loss_5pct(&slices.primary).ok();

        match (&slices.pair, &slices.benchmark) {
            (Some(pair), Some(own)) => {
                let benchmark_etl = analytics::expected_tail_loss_5pct(own).ok();
                charts::returns_line(&[(&pair.primary, primary_etl), (&pair.benchmark, benchmark_etl)])
            }
            _ => charts::returns_line(&[(&slices.primary, primary_etl)]),
        }
    }

    pub fn returns_histogram(&self, selection: &Selection) -> HistogramChart {
        let slices = self.slices(selection);
        match &slices.pair {
            Some(pair) => charts::pair_histogram(pair),
            None => {
                let etl = analytics::expected_tail_loss_5pct(&slices.primary).ok();
                charts::tail_histogram(&slices.primary, etl)
            }
        }
    }

    pub fn chart(&self, tab: ChartTab, selection: &Selection) -> Chart {
        match tab {
            ChartTab::Candlestick => Chart::Candlestick(self.candlestick(selection)),
            ChartTab::PriceLine => Chart::Line(self.price_line(selection)),
            ChartTab::ReturnsLine => Chart::Line(self.returns_line(selection)),
            ChartTab::ReturnsHistogram => Chart::Histogram(self.returns_histogram(selection)),
        }
    }
}
