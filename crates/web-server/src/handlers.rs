use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::DateRange;
use dashboard::{
    next_range, Chart, ChartTab, RangeEvent, RangeUpdate, Selection, StatsPanel, StatsResult,
    TickerOption,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query string shared by the stats and chart endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub ticker: Option<String>,
    pub benchmark: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SelectionQuery {
    /// Fills gaps from the dataset: the first ticker, and the dataset bounds for
    /// whichever end of the range is missing. An empty benchmark means none.
    fn into_selection(self, state: &AppState) -> Result<Selection, AppError> {
        let dashboard = &state.dashboard;
        let ticker = match self.ticker.filter(|t| !t.trim().is_empty()) {
            Some(ticker) => ticker,
            None => dashboard
                .default_ticker()
                .map(str::to_string)
                .ok_or_else(|| AppError::Internal("dataset has no tickers".to_string()))?,
        };

        let range = dashboard.partial_range(self.start_date, self.end_date)?;

        Ok(Selection {
            ticker,
            benchmark: self.benchmark.filter(|b| !b.trim().is_empty()),
            range,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    pub ticker: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TickersResponse {
    pub tickers: Vec<String>,
    pub default_ticker: Option<String>,
    pub date_bounds: DateRange,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: StatsResult,
    pub panel: StatsPanel,
}

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub active: ChartTab,
    pub source: ChartTab,
    pub event: RangeEvent,
    #[serde(default)]
    pub current: Option<DateRange>,
}

/// # GET /api/tickers
pub async fn get_tickers(State(state): State<Arc<AppState>>) -> Json<TickersResponse> {
    let dashboard = &state.dashboard;
    Json(TickersResponse {
        tickers: dashboard.tickers().into_iter().map(str::to_string).collect(),
        default_ticker: dashboard.default_ticker().map(str::to_string),
        date_bounds: dashboard.date_bounds(),
    })
}

/// # GET /api/benchmark-options?ticker=
pub async fn get_benchmark_options(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OptionsQuery>,
) -> Json<Vec<TickerOption>> {
    let primary = query.ticker.unwrap_or_default();
    Json(state.dashboard.benchmark_options(&primary))
}

/// # GET /api/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let selection = query.into_selection(&state)?;
    let stats = state.dashboard.stats(&selection);
    let panel = StatsPanel::from(&stats);
    Ok(Json(StatsResponse { stats, panel }))
}

/// # GET /api/charts/:kind
pub async fn get_chart(
    Path(kind): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<Chart>, AppError> {
    let tab: ChartTab = kind.parse()?;
    let selection = query.into_selection(&state)?;
    Ok(Json(state.dashboard.chart(tab, &selection)))
}

/// # POST /api/date-range
/// Applies a chart relayout event to the current date range.
pub async fn post_date_range(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RangeRequest>,
) -> Json<RangeUpdate> {
    let update = next_range(
        state.dashboard.date_bounds(),
        request.current,
        request.active,
        request.source,
        &request.event,
    );
    tracing::debug!(?update, "Date range updated.");
    Json(update)
}
