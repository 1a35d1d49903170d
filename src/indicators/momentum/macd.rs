//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::{Candle, MacdIndicator};

/// Full MACD series, one value per candle.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Every EMA is seeded with its first input value.
pub fn calculate_macd_series(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> MacdSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = math::ema_series(&closes, fast_period as usize);
    let slow = math::ema_series(&closes, slow_period as usize);

    let line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal = math::ema_series(&line, signal_period as usize);
    let histogram = line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}

/// Latest MACD values together with the two preceding histogram values.
///
/// Missing preceding histogram values read as 0.
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    if fast_period == 0 || slow_period == 0 || signal_period == 0 {
        return None;
    }
    if candles.len() < slow_period as usize {
        return None;
    }

    let series = calculate_macd_series(candles, fast_period, slow_period, signal_period);
    let n = series.histogram.len();
    let nth_back = |k: usize| -> f64 {
        if n > k {
            series.histogram[n - 1 - k]
        } else {
            0.0
        }
    };

    Some(MacdIndicator {
        macd: *series.line.last()?,
        signal: *series.signal.last()?,
        histogram: nth_back(0),
        histogram_prev: nth_back(1),
        histogram_prev2: nth_back(2),
        period: (fast_period, slow_period, signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdIndicator> {
    calculate_macd(candles, 12, 26, 9)
}
