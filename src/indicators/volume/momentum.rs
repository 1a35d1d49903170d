//! Short-horizon read of the last closed candles

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::indicators::volume::stats::VOLUME_AVERAGE_WINDOW;
use crate::models::indicators::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleKind {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumTrend {
    StrongBullish,
    Bullish,
    StrongBearish,
    Bearish,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMomentum {
    pub candle_kinds: Vec<CandleKind>,
    pub bullish_count: usize,
    pub bearish_count: usize,
    /// Candles whose volume beat the rolling average.
    pub high_volume_count: usize,
    pub trend: MomentumTrend,
    pub volume_trend: VolumeTrend,
}

/// Looks at the last `count` closed candles, skipping the in-progress one.
pub fn analyze_recent_momentum(candles: &[Candle], count: usize) -> Option<RecentMomentum> {
    let n = candles.len();
    if n < 2 || count == 0 {
        return None;
    }

    let closed = &candles[n.saturating_sub(count + 1)..n - 1];
    let average_source = if n > VOLUME_AVERAGE_WINDOW {
        &candles[n - 1 - VOLUME_AVERAGE_WINDOW..n - 1]
    } else {
        candles
    };
    let volumes: Vec<f64> = average_source.iter().map(|c| c.volume).collect();
    let avg_volume = math::mean(&volumes)?;

    let candle_kinds: Vec<CandleKind> = closed
        .iter()
        .map(|c| {
            if c.is_bullish() {
                CandleKind::Bullish
            } else {
                CandleKind::Bearish
            }
        })
        .collect();
    let bullish_count = candle_kinds
        .iter()
        .filter(|&&k| k == CandleKind::Bullish)
        .count();
    let bearish_count = candle_kinds.len() - bullish_count;
    let high_volume_count = closed.iter().filter(|c| c.volume > avg_volume).count();
    let volume_rising = high_volume_count >= 2;

    let trend = if bullish_count == count && volume_rising {
        MomentumTrend::StrongBullish
    } else if bullish_count >= 2 {
        MomentumTrend::Bullish
    } else if bearish_count == count && volume_rising {
        MomentumTrend::StrongBearish
    } else if bearish_count >= 2 {
        MomentumTrend::Bearish
    } else {
        MomentumTrend::Sideways
    };

    let volume_trend = if volume_rising {
        VolumeTrend::Increasing
    } else if high_volume_count == 0 {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Stable
    };

    Some(RecentMomentum {
        candle_kinds,
        bullish_count,
        bearish_count,
        high_volume_count,
        trend,
        volume_trend,
    })
}
