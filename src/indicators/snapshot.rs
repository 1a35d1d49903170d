//! Computes every indicator for one candle series into an `IndicatorSnapshot`

use tracing::debug;

use crate::config::EngineConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{macd, rsi};
use crate::indicators::trend::ema;
use crate::indicators::volatility::{atr, bollinger};
use crate::indicators::volume::{stats, vwap};
use crate::models::indicators::{Candle, IndicatorSnapshot};

/// Shortest series the pipeline accepts; the slow EMA and MACD need the headroom.
pub const MIN_CANDLES: usize = 50;

pub const EMA_FAST_PERIOD: u32 = 21;
pub const EMA_SLOW_PERIOD: u32 = 50;
pub const RSI_PERIOD: u32 = 14;
pub const BOLLINGER_PERIOD: u32 = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
pub const MACD_FAST_PERIOD: u32 = 12;
pub const MACD_SLOW_PERIOD: u32 = 26;
pub const MACD_SIGNAL_PERIOD: u32 = 9;
pub const ATR_PERIOD: u32 = 14;

pub fn calculate_snapshot(
    candles: &[Candle],
    config: &EngineConfig,
) -> Result<IndicatorSnapshot, IndicatorError> {
    if candles.len() < MIN_CANDLES {
        return Err(insufficient(candles));
    }
    let last = candles.last().ok_or_else(|| insufficient(candles))?;
    let price = last.close;

    let ema21 = ema::calculate_ema(candles, EMA_FAST_PERIOD).ok_or_else(|| insufficient(candles))?;
    let ema50 = ema::calculate_ema(candles, EMA_SLOW_PERIOD).ok_or_else(|| insufficient(candles))?;
    let rsi = rsi::calculate_rsi(candles, RSI_PERIOD).ok_or_else(|| insufficient(candles))?;
    let bands = bollinger::calculate_bollinger_bands(candles, BOLLINGER_PERIOD, BOLLINGER_STD_DEV)
        .ok_or_else(|| insufficient(candles))?;
    let band_context =
        bollinger::calculate_band_context(candles).ok_or_else(|| insufficient(candles))?;
    let macd = macd::calculate_macd(
        candles,
        MACD_FAST_PERIOD,
        MACD_SLOW_PERIOD,
        MACD_SIGNAL_PERIOD,
    )
    .ok_or_else(|| insufficient(candles))?;
    let atr = atr::calculate_atr(candles, ATR_PERIOD).ok_or_else(|| insufficient(candles))?;
    let volume = stats::calculate_volume_stats(candles, config.volume_mode, config.volume_lookback)
        .ok_or_else(|| insufficient(candles))?;

    // No traded volume in the session yet: fall back to the typical price.
    let vwap = vwap::calculate_session_vwap(candles).unwrap_or_else(|| last.typical_price());

    debug!(
        candles = candles.len(),
        price,
        rsi = rsi.value,
        atr = atr.value,
        "indicator snapshot computed"
    );

    Ok(IndicatorSnapshot {
        price,
        ema21: ema21.value,
        ema50: ema50.value,
        rsi: rsi.value,
        bb_upper: bands.upper,
        bb_middle: bands.middle,
        bb_lower: bands.lower,
        macd_line: macd.macd,
        macd_signal: macd.signal,
        macd_histogram: macd.histogram,
        macd_histogram_prev: macd.histogram_prev,
        macd_histogram_prev2: macd.histogram_prev2,
        vwap,
        atr: atr.value,
        volume,
        band_context,
        candle_open_time: last.open_time,
        candle_close_time: last.close_time,
    })
}

fn insufficient(candles: &[Candle]) -> IndicatorError {
    IndicatorError::InsufficientData {
        required: MIN_CANDLES,
        actual: candles.len(),
    }
}
