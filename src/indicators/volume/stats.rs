//! Volume statistics against a rolling average

use crate::common::math;
use crate::models::indicators::{Candle, VolumeMode, VolumeStats};

/// Candles averaged for the rolling volume baseline.
pub const VOLUME_AVERAGE_WINDOW: usize = 20;

/// Volume of the reference candle and its predecessor, compared with the mean of
/// the candles strictly preceding the reference.
///
/// The rolling average uses the last `VOLUME_AVERAGE_WINDOW` preceding candles, or all
/// of them when fewer exist. Bullish/bearish counts cover the `lookback` candles
/// immediately before the reference. Percentage changes are 0 when the average is 0.
pub fn calculate_volume_stats(
    candles: &[Candle],
    mode: VolumeMode,
    lookback: usize,
) -> Option<VolumeStats> {
    let reference = match mode {
        VolumeMode::InProgress => candles.len().checked_sub(1)?,
        VolumeMode::LastClosed => candles.len().checked_sub(2)?,
    };
    if reference == 0 {
        return None;
    }

    let current = candles[reference].volume;
    let previous = candles[reference - 1].volume;

    let avg_start = reference.saturating_sub(VOLUME_AVERAGE_WINDOW);
    let preceding: Vec<f64> = candles[avg_start..reference]
        .iter()
        .map(|c| c.volume)
        .collect();
    let rolling_average = math::mean(&preceding)?;

    let window = &candles[reference.saturating_sub(lookback)..reference];
    let bullish_count = window.iter().filter(|c| c.is_bullish()).count();

    Some(VolumeStats {
        current,
        previous,
        rolling_average,
        pct_change_current: pct_vs_average(current, rolling_average),
        pct_change_previous: pct_vs_average(previous, rolling_average),
        bullish_count,
        bearish_count: window.len() - bullish_count,
        sample_count: window.len(),
    })
}

fn pct_vs_average(volume: f64, average: f64) -> f64 {
    if average > 0.0 {
        math::pct_change(volume, average)
    } else {
        0.0
    }
}
