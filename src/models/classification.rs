//! Qualitative indicator states

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaPosition {
    AboveBoth,
    BelowBoth,
    Between,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaCross {
    BullishCross,
    BearishCross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    NeutralLow,
    BullishMomentum,
    Overbought,
    BearishMomentum,
    NeutralHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerState {
    ReboundLower,
    BreakingUpper,
    RejectingUpper,
    BreakingLower,
    MidRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdLineState {
    AboveSignal,
    BelowSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramTrend {
    BullishStrengthening,
    BullishWeakening,
    BearishStrengthening,
    BearishWeakening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeState {
    RisingOnBullish,
    RisingOnBearish,
    Rising,
    Falling,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VwapSide {
    Above,
    Below,
}

/// Every label derived from one `IndicatorSnapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSet {
    pub ema_position: EmaPosition,
    pub ema_cross: EmaCross,
    pub rsi_zone: RsiZone,
    pub bollinger: BollingerState,
    pub macd_line: MacdLineState,
    pub macd_histogram: HistogramTrend,
    pub volume: VolumeState,
    pub vwap: VwapSide,
}

impl fmt::Display for EmaPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmaPosition::AboveBoth => "price above EMA 21 and EMA 50",
            EmaPosition::BelowBoth => "price below EMA 21 and EMA 50",
            EmaPosition::Between => "price between EMAs",
        })
    }
}

impl fmt::Display for EmaCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmaCross::BullishCross => "EMA 21 above EMA 50 (golden cross)",
            EmaCross::BearishCross => "EMA 21 below EMA 50 (death cross)",
        })
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RsiZone::Oversold => "RSI 0-35 (oversold)",
            RsiZone::NeutralLow => "RSI 35-45 (neutral low)",
            RsiZone::BullishMomentum => "RSI 45-65 (bullish momentum)",
            RsiZone::Overbought => "RSI 65-100 (overbought)",
            RsiZone::BearishMomentum => "RSI 35-55 (bearish momentum)",
            RsiZone::NeutralHigh => "RSI 55-65 (neutral high)",
        })
    }
}

impl fmt::Display for BollingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BollingerState::ReboundLower => "rebounding off lower band",
            BollingerState::BreakingUpper => "breaking upper band",
            BollingerState::RejectingUpper => "rejecting upper band",
            BollingerState::BreakingLower => "breaking lower band",
            BollingerState::MidRange => "mid-range",
        })
    }
}

impl fmt::Display for MacdLineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MacdLineState::AboveSignal => "MACD line above signal",
            MacdLineState::BelowSignal => "MACD line below signal",
        })
    }
}

impl fmt::Display for HistogramTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistogramTrend::BullishStrengthening => "histogram positive and growing",
            HistogramTrend::BullishWeakening => "histogram positive and fading",
            HistogramTrend::BearishStrengthening => "histogram negative and growing",
            HistogramTrend::BearishWeakening => "histogram negative and fading",
        })
    }
}

impl fmt::Display for VolumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolumeState::RisingOnBullish => "volume rising on bullish candles",
            VolumeState::RisingOnBearish => "volume rising on bearish candles",
            VolumeState::Rising => "volume rising",
            VolumeState::Falling => "volume falling",
            VolumeState::Normal => "volume normal",
        })
    }
}

impl fmt::Display for VwapSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VwapSide::Above => "price above VWAP",
            VwapSide::Below => "price below VWAP",
        })
    }
}
