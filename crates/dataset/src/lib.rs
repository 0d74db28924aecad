//! # TickerLens Dataset Crate
//!
//! Holds the complete daily price history for every ticker and answers
//! range and alignment queries over it.
//!
//! ## Architectural Principles
//!
//! - **Load Once, Read Forever:** The `DatasetStore` is built a single time from a
//!   flat CSV file and is never mutated afterwards. It is shared by `Arc` with every
//!   request handler, so concurrent requests cannot race.
//! - **Indexed Access:** Rows are grouped per ticker and sorted by date at load time.
//!   `slice` is two binary searches; `align` is a linear merge-join.
//! - **Empty Is A Value:** Unknown tickers and empty ranges produce empty series.
//!   Only malformed input files are errors.
//!
//! ## Public API
//!
//! - `load_csv` / `load_from_reader`: Build a store from the source file.
//! - `DatasetStore`: The store, with `slice` and `align`.
//! - `align_series`: Inner-join two already-sliced series.
//! - `DatasetError`: Fatal load errors.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod slice;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::{load_csv, load_from_reader, DEFAULT_DATE_FORMAT, REQUIRED_COLUMNS};
pub use slice::align_series;
pub use store::DatasetStore;
