//! # TickerLens Dashboard
//!
//! Turns a user's selection into everything the dashboard shows: the statistics
//! panel, chart-ready series and the shared date range.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Orchestration:** Sits above `dataset` and `analytics` and wires them
//!   together. It never reads files and never speaks HTTP; the CLI and the web
//!   server are both thin callers of this crate.
//! - **Data, Not Markup:** Charts are plain serializable structs. Styling and
//!   rendering are left to whatever consumes them.
//! - **Blank Over Broken:** A statistic that cannot be computed shows as an empty
//!   cell; an empty range draws empty charts. Neither is an error.
//!
//! ## Public API
//!
//! - `Dashboard`: The entry point, built from a shared `DatasetStore`.
//! - `Selection`: Ticker, optional benchmark and optional date range.
//! - `StatsPanel`: Rounded, labelled statistics rows.
//! - `Chart` and the chart structs in `charts`.
//! - `next_range`: The date-range state machine driven by chart events.

// Declare the modules that constitute this crate.
pub mod charts;
pub mod controller;
pub mod error;
pub mod panel;
pub mod range;

// Re-export the key components to create a clean, public-facing API.
pub use analytics::StatsResult;
pub use charts::{Chart, CandlestickChart, HistogramChart, LineChart};
pub use controller::{Dashboard, Selection, TickerOption};
pub use error::DashboardError;
pub use panel::{PanelRow, StatsPanel};
pub use range::{next_range, ChartTab, RangeEvent, RangeState, RangeUpdate};
