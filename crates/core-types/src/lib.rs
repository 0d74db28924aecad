//! # TickerLens Core Types
//!
//! The shared vocabulary of the workspace: daily observations, per-ticker series,
//! inclusive date ranges and date-aligned series pairs.
//!
//! This is the Layer 0 crate. It has no knowledge of files, statistics or HTTP;
//! every other crate depends on it.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Field;
pub use error::CoreError;
pub use structs::{AlignedPair, DateRange, Observation, Series};
