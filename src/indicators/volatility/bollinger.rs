//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::{BandContext, BollingerBands, BollingerBandsIndicator, Candle};

/// Bands for every candle; `None` for the first `period - 1` candles.
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_series(
    candles: &[Candle],
    period: u32,
    std_dev: f64,
) -> Vec<Option<BollingerBands>> {
    let period = period as usize;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    (0..closes.len())
        .map(|i| {
            if period < 2 || i + 1 < period {
                return None;
            }
            let window = &closes[i + 1 - period..=i];
            let middle = math::sma(window, period)?;
            let std = math::standard_deviation(window, period)?;
            Some(BollingerBands {
                upper: middle + std_dev * std,
                middle,
                lower: middle - std_dev * std,
            })
        })
        .collect()
}

pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: u32,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    if period < 2 || candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period as usize)?;
    let std = math::standard_deviation(&closes, period as usize)?;

    Some(BollingerBandsIndicator {
        upper: middle + std_dev * std,
        middle,
        lower: middle - std_dev * std,
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(candles, 20, 2.0)
}

/// Previous candle and recent volume used to classify price against the bands.
///
/// Without a previous candle the previous values fall back to the latest close;
/// with fewer than six candles the average volume falls back to the current volume.
pub fn calculate_band_context(candles: &[Candle]) -> Option<BandContext> {
    let last = candles.last()?;
    let n = candles.len();

    let (prev_high, prev_low, prev_close) = if n >= 2 {
        let prev = &candles[n - 2];
        (prev.high, prev.low, prev.close)
    } else {
        (last.close, last.close, last.close)
    };

    let avg_volume_5 = if n >= 6 {
        let volumes: Vec<f64> = candles[n - 6..n - 1].iter().map(|c| c.volume).collect();
        math::mean(&volumes).unwrap_or(last.volume)
    } else {
        last.volume
    };

    Some(BandContext {
        prev_high,
        prev_low,
        prev_close,
        current_volume: last.volume,
        avg_volume_5,
    })
}
