use crate::error::DashboardError;
use chrono::NaiveDate;
use core_types::DateRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The chart tabs. Only the three time-axis charts drive the date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTab {
    Candlestick,
    PriceLine,
    ReturnsLine,
    ReturnsHistogram,
}

impl ChartTab {
    pub const ALL: [ChartTab; 4] = [
        ChartTab::Candlestick,
        ChartTab::PriceLine,
        ChartTab::ReturnsLine,
        ChartTab::ReturnsHistogram,
    ];

    /// The URL segment used for this tab.
    pub fn slug(self) -> &'static str {
        match self {
            ChartTab::Candlestick => "candlestick",
            ChartTab::PriceLine => "price-line",
            ChartTab::ReturnsLine => "returns-line",
            ChartTab::ReturnsHistogram => "returns-histogram",
        }
    }

    /// A histogram's x-axis is returns, not dates, so zooming it says nothing
    /// about the date range.
    pub fn has_time_axis(self) -> bool {
        !matches!(self, ChartTab::ReturnsHistogram)
    }
}

impl fmt::Display for ChartTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartTab {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ChartTab::ALL
            .into_iter()
            .find(|tab| tab.slug() == normalized)
            .ok_or_else(|| DashboardError::UnknownChart(s.to_string()))
    }
}

/// A relayout event reported by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeEvent {
    /// The user dragged out a window on the time axis. The ends may arrive in
    /// either order.
    Dragged { start: NaiveDate, end: NaiveDate },
    /// The user reset the axis.
    AutoRange,
    /// Any other relayout (resize, pan on the y-axis, hover mode changes).
    Other,
}

/// Why the range ended up where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeState {
    NoSelection,
    UserDragged,
    Reset,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeUpdate {
    pub range: DateRange,
    pub state: RangeState,
}

/// Computes the selected date range after a chart event.
///
/// # Arguments
///
/// * `bounds` - The dataset's first and last dates; the default range.
/// * `current` - The range in effect before the event, if any.
/// * `active` - The tab currently shown.
/// * `source` - The tab that emitted the event.
pub fn next_range(
    bounds: DateRange,
    current: Option<DateRange>,
    active: ChartTab,
    source: ChartTab,
    event: &RangeEvent,
) -> RangeUpdate {
    let Some(current) = current else {
        return RangeUpdate {
            range: bounds,
            state: RangeState::NoSelection,
        };
    };

    let idle = RangeUpdate {
        range: current,
        state: RangeState::Idle,
    };

    if source != active || !source.has_time_axis() {
        tracing::trace!(%active, %source, "Ignoring range event from inactive chart.");
        return idle;
    }

    match *event {
        RangeEvent::Dragged { start, end } => {
            let (start, end) = if start <= end { (start, end) } else { (end, start) };
            // Ordered above, so construction cannot fail.
            match DateRange::new(start, end) {
                Ok(range) => RangeUpdate {
                    range,
                    state: RangeState::UserDragged,
                },
                Err(_) => idle,
            }
        }
        RangeEvent::AutoRange => RangeUpdate {
            range: bounds,
            state: RangeState::Reset,
        },
        RangeEvent::Other => idle,
    }
}
