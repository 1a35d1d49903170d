//! Entry timing read for short timeframes

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::rsi;
use crate::indicators::snapshot::RSI_PERIOD;
use crate::indicators::volume::momentum::{analyze_recent_momentum, RecentMomentum};
use crate::models::indicators::{Candle, CandleCompletion};
use crate::models::signal::SignalEvaluation;
use crate::signals::engine::SignalEngine;

/// Closed candles inspected for short-term momentum.
pub const MOMENTUM_CANDLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiTrend {
    Rising,
    Falling,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramMagnitude {
    Growing,
    Shrinking,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryTiming {
    pub evaluation: SignalEvaluation,
    pub momentum: RecentMomentum,
    /// Move of the in-progress candle from its open, in percent.
    pub candle_movement_pct: f64,
    pub candle_high: f64,
    pub candle_low: f64,
    pub rsi_trend: Option<RsiTrend>,
    pub histogram_magnitude: HistogramMagnitude,
    pub completion: CandleCompletion,
}

pub fn analyze_entry_timing(
    candles: &[Candle],
    config: &EngineConfig,
    now_ms: i64,
) -> Result<EntryTiming, IndicatorError> {
    let evaluation = SignalEngine::evaluate(candles, config)?;
    let current = candles.last().ok_or(IndicatorError::InsufficientData {
        required: 1,
        actual: 0,
    })?;
    let momentum = analyze_recent_momentum(candles, MOMENTUM_CANDLES).ok_or(
        IndicatorError::InsufficientData {
            required: MOMENTUM_CANDLES + 1,
            actual: candles.len(),
        },
    )?;

    let candle_movement_pct = if current.open == 0.0 {
        0.0
    } else {
        (current.close - current.open) / current.open * 100.0
    };

    let s = &evaluation.snapshot;
    let histogram_magnitude =
        histogram_magnitude(s.macd_histogram, s.macd_histogram_prev, s.macd_histogram_prev2);

    Ok(EntryTiming {
        momentum,
        candle_movement_pct,
        candle_high: current.high,
        candle_low: current.low,
        rsi_trend: rsi_trend(candles),
        histogram_magnitude,
        completion: current.completion(now_ms),
        evaluation,
    })
}

/// Direction of RSI across the last three closed candles.
pub fn rsi_trend(candles: &[Candle]) -> Option<RsiTrend> {
    let series = rsi::calculate_rsi_series(candles, RSI_PERIOD);
    let n = series.len();
    if n < 3 {
        return None;
    }
    let window = &series[n.saturating_sub(4)..n - 1];
    let (first, last) = (*window.first()?, *window.last()?);

    Some(if last > first {
        RsiTrend::Rising
    } else if last < first {
        RsiTrend::Falling
    } else {
        RsiTrend::Flat
    })
}

pub fn histogram_magnitude(histogram: f64, prev: f64, prev2: f64) -> HistogramMagnitude {
    let (h, p, p2) = (histogram.abs(), prev.abs(), prev2.abs());
    if h > p && p > p2 {
        HistogramMagnitude::Growing
    } else if h < p && p < p2 {
        HistogramMagnitude::Shrinking
    } else {
        HistogramMagnitude::Stable
    }
}
