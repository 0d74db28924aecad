use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric column of the dataset.
///
/// `Ticker` and `Date` are deliberately absent: they are keys, not values, and
/// asking for a statistic over them is rejected when the name is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
    DailyReturnPct,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
        Field::DailyReturnPct,
    ];

    /// The header this field carries in the source CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
            Field::DailyReturnPct => "Daily Returns %",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    /// Accepts both the CSV headers ("Daily Returns %") and snake_case names
    /// ("daily_return_pct"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Field::Open),
            "high" => Ok(Field::High),
            "low" => Ok(Field::Low),
            "close" => Ok(Field::Close),
            "volume" => Ok(Field::Volume),
            "daily returns %" | "daily_return_pct" | "daily_returns_pct" => {
                Ok(Field::DailyReturnPct)
            }
            "ticker" | "date" => Err(CoreError::NonNumericField(s.to_string())),
            _ => Err(CoreError::UnknownField(s.to_string())),
        }
    }
}
