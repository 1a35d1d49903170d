use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar. Times are Unix epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open_time: i64,
        close_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            open_time,
            close_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    pub fn open_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }

    pub fn duration_ms(&self) -> i64 {
        self.close_time - self.open_time
    }

    /// How far the candle has progressed at `now_ms`.
    ///
    /// Percent is rounded to one decimal. A candle that has not opened yet reports
    /// 0% with its full duration remaining; a closed candle reports 100% and 0s.
    pub fn completion(&self, now_ms: i64) -> CandleCompletion {
        let total = self.duration_ms();
        let elapsed = now_ms - self.open_time;

        if elapsed < 0 {
            return CandleCompletion {
                percent: 0.0,
                seconds_remaining: total / 1000,
            };
        }
        if elapsed > total || total <= 0 {
            return CandleCompletion {
                percent: 100.0,
                seconds_remaining: 0,
            };
        }

        let percent = (elapsed as f64 / total as f64) * 100.0;
        CandleCompletion {
            percent: (percent * 10.0).round() / 10.0,
            seconds_remaining: ((self.close_time - now_ms) / 1000).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleCompletion {
    pub percent: f64,
    pub seconds_remaining: i64,
}

/// Which candle volume statistics are anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMode {
    /// The last element, which may still be forming.
    #[default]
    InProgress,
    /// The second-to-last element, the most recent closed candle.
    LastClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub current: f64,
    pub previous: f64,
    pub rolling_average: f64,
    pub pct_change_current: f64,
    pub pct_change_previous: f64,
    pub bullish_count: usize,
    pub bearish_count: usize,
    pub sample_count: usize,
}

/// Inputs the Bollinger classification reads besides the bands themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandContext {
    pub prev_high: f64,
    pub prev_low: f64,
    pub prev_close: f64,
    pub current_volume: f64,
    /// Mean volume of candles -6..-2 relative to the latest.
    pub avg_volume_5: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub histogram_prev: f64,
    pub histogram_prev2: f64,
    pub period: (u32, u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtrIndicator {
    pub value: f64,
    pub period: u32,
}

/// Latest indicator values of one evaluation pass. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub ema21: f64,
    pub ema50: f64,
    pub rsi: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub macd_histogram_prev: f64,
    pub macd_histogram_prev2: f64,
    pub vwap: f64,
    pub atr: f64,
    pub volume: VolumeStats,
    pub band_context: BandContext,
    pub candle_open_time: i64,
    pub candle_close_time: i64,
}
