//! # TickerLens Analytics Engine
//!
//! Descriptive and co-movement statistics over ticker slices: mean, population
//! variance, expected tail loss, covariance, correlation, beta and paired
//! trading-day classification.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   configuration or HTTP. It depends only on `core-types` (Layer 0).
//! - **Typed Failures:** Each statistic returns a `StatsError` for empty input,
//!   unknown fields, undefined results (fewer than two rows, zero variance) and
//!   misaligned pairs. Nothing returns a sentinel float.
//! - **Stateless Calculation:** `AnalyticsEngine` takes slices and produces a
//!   `StatsResult`; repeated calls with the same input give the same output.
//!
//! ## Public API
//!
//! - `stats`: The individual statistic functions.
//! - `AnalyticsEngine`: Fills a whole `StatsResult`, blanking failed fields.
//! - `StatsResult`, `BenchmarkStats`, `TradingDayCounts`: Result types.
//! - `StatsError`: The error kinds returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::StatsError;
pub use report::{BenchmarkStats, StatsResult, TradingDayCounts};
pub use stats::{
    beta, correlation, covariance, expected_tail_loss, expected_tail_loss_5pct, mean, mean_of,
    trading_day_count_single, trading_day_counts, variance, variance_of,
};
