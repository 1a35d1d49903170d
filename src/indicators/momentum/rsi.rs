//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::{Candle, RsiIndicator};

/// RSI for every candle using Wilder smoothing.
///
/// RSI = 100 - (100 / (1 + RS)), RS = avg gain / avg loss.
/// The first candle has no previous close and contributes a zero delta.
/// Average gain and loss are smoothed with alpha = 1/period, seeded at the first
/// sample. When the average loss is zero the RSI saturates at 100.
pub fn calculate_rsi_series(candles: &[Candle], period: u32) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(candles.len());
    let mut losses = Vec::with_capacity(candles.len());
    let mut prev_close: Option<f64> = None;

    for candle in candles {
        let change = prev_close.map_or(0.0, |pc| candle.close - pc);
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
        prev_close = Some(candle.close);
    }

    let avg_gains = math::wilder_series(&gains, period as usize);
    let avg_losses = math::wilder_series(&losses, period as usize);

    avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|(&gain, &loss)| rsi_from_averages(gain, loss))
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Latest RSI value
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Option<RsiIndicator> {
    if period == 0 || candles.len() < period as usize + 1 {
        return None;
    }

    let value = *calculate_rsi_series(candles, period).last()?;
    Some(RsiIndicator { value, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<RsiIndicator> {
    calculate_rsi(candles, 14)
}
