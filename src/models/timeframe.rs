use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle duration bucket analysed by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    M5,
    M15,
    H1,
    H4,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeframeError(pub String);

impl fmt::Display for ParseTimeframeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timeframe: {}", self.0)
    }
}

impl std::error::Error for ParseTimeframeError {}

impl Timeframe {
    /// Timeframes covered by the initial analysis and by updates, slowest first.
    pub const TREND: [Timeframe; 3] = [Timeframe::H4, Timeframe::H1, Timeframe::M15];

    /// Exchange interval notation.
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
        }
    }

    /// Key under which the timeframe is persisted.
    pub fn state_key(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5min",
            Timeframe::M15 => "15min",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
        }
    }

    pub fn duration_ms(&self) -> i64 {
        match self {
            Timeframe::M5 => 5 * 60_000,
            Timeframe::M15 => 15 * 60_000,
            Timeframe::H1 => 60 * 60_000,
            Timeframe::H4 => 4 * 60 * 60_000,
        }
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5m" | "5min" | "m5" => Ok(Timeframe::M5),
            "15m" | "15min" | "m15" => Ok(Timeframe::M15),
            "1h" | "h1" => Ok(Timeframe::H1),
            "4h" | "h4" => Ok(Timeframe::H4),
            _ => Err(ParseTimeframeError(s.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interval())
    }
}
