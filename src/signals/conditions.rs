//! Long/short condition vectors built from classified states

use crate::models::classification::{
    BollingerState, ClassificationSet, HistogramTrend, MacdLineState, VolumeState,
};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{ConditionVector, TradeDirection, CONDITION_COUNT};

/// Rule names by index, long side.
pub const LONG_RULE_NAMES: [&str; CONDITION_COUNT] = [
    "price above EMA 21 and EMA 50",
    "EMA 21 above EMA 50",
    "RSI between 45 and 65",
    "rebounding off lower band or breaking upper band",
    "MACD line above signal with growing positive histogram",
    "volume rising on bullish candles",
    "price above VWAP",
];

/// Rule names by index, short side.
pub const SHORT_RULE_NAMES: [&str; CONDITION_COUNT] = [
    "price below EMA 21 and EMA 50",
    "EMA 21 below EMA 50",
    "RSI between 35 and 55",
    "rejecting upper band or breaking lower band",
    "MACD line below signal with growing negative histogram",
    "volume rising on bearish candles",
    "price below VWAP",
];

pub fn rule_names(direction: TradeDirection) -> &'static [&'static str; CONDITION_COUNT] {
    match direction {
        TradeDirection::Long => &LONG_RULE_NAMES,
        TradeDirection::Short => &SHORT_RULE_NAMES,
    }
}

pub fn evaluate_long(snapshot: &IndicatorSnapshot, states: &ClassificationSet) -> ConditionVector {
    let s = snapshot;
    ConditionVector::new(
        TradeDirection::Long,
        [
            s.price > s.ema21 && s.price > s.ema50,
            s.ema21 > s.ema50,
            (45.0..=65.0).contains(&s.rsi),
            matches!(
                states.bollinger,
                BollingerState::ReboundLower | BollingerState::BreakingUpper
            ),
            states.macd_line == MacdLineState::AboveSignal
                && states.macd_histogram == HistogramTrend::BullishStrengthening,
            states.volume == VolumeState::RisingOnBullish,
            s.price > s.vwap,
        ],
    )
}

pub fn evaluate_short(snapshot: &IndicatorSnapshot, states: &ClassificationSet) -> ConditionVector {
    let s = snapshot;
    ConditionVector::new(
        TradeDirection::Short,
        [
            s.price < s.ema21 && s.price < s.ema50,
            s.ema21 < s.ema50,
            (35.0..=55.0).contains(&s.rsi),
            matches!(
                states.bollinger,
                BollingerState::RejectingUpper | BollingerState::BreakingLower
            ),
            states.macd_line == MacdLineState::BelowSignal
                && states.macd_histogram == HistogramTrend::BearishStrengthening,
            states.volume == VolumeState::RisingOnBearish,
            s.price < s.vwap,
        ],
    )
}

pub fn evaluate(
    snapshot: &IndicatorSnapshot,
    states: &ClassificationSet,
    direction: TradeDirection,
) -> ConditionVector {
    match direction {
        TradeDirection::Long => evaluate_long(snapshot, states),
        TradeDirection::Short => evaluate_short(snapshot, states),
    }
}
