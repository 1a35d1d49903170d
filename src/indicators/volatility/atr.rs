//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::{AtrIndicator, Candle};

/// ATR for every candle using Wilder smoothing seeded at the first true range.
pub fn calculate_atr_series(candles: &[Candle], period: u32) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }

    let mut prev_close: Option<f64> = None;
    let tr_values: Vec<f64> = candles
        .iter()
        .map(|c| {
            let tr = math::true_range(c.high, c.low, prev_close);
            prev_close = Some(c.close);
            tr
        })
        .collect();

    math::wilder_series(&tr_values, period as usize)
}

/// Calculate ATR (Average True Range)
///
/// ATR measures market volatility by averaging true range over a period
pub fn calculate_atr(candles: &[Candle], period: u32) -> Option<AtrIndicator> {
    if period == 0 || candles.len() < period as usize + 1 {
        return None;
    }

    let value = *calculate_atr_series(candles, period).last()?;
    Some(AtrIndicator { value, period })
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<AtrIndicator> {
    calculate_atr(candles, 14)
}
