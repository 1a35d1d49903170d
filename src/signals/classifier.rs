//! Maps indicator values to qualitative states.
//!
//! Rules with overlapping ranges are kept as ordered tables: they are checked top
//! down and the first matching rule wins. Equality on a two-way split always lands
//! on the below/bearish side.

use crate::models::classification::{
    BollingerState, ClassificationSet, EmaCross, EmaPosition, HistogramTrend, MacdLineState,
    RsiZone, VolumeState, VwapSide,
};
use crate::models::indicators::{BandContext, IndicatorSnapshot, VolumeStats};

/// Distance to a band, in percent of price, that still counts as touching it.
pub const BAND_PROXIMITY_PCT: f64 = 0.5;

/// Volume change versus its average, in percent, that counts as a move.
pub const VOLUME_CHANGE_PCT: f64 = 20.0;

/// One entry of a priority-ordered rule table.
pub struct ClassificationRule<I: ?Sized, L> {
    pub label: L,
    pub matches: fn(&I) -> bool,
}

/// Label of the first rule that matches, or `fallback` when none does.
pub fn first_match<I: ?Sized, L: Copy>(
    rules: &[ClassificationRule<I, L>],
    input: &I,
    fallback: L,
) -> L {
    rules
        .iter()
        .find(|rule| (rule.matches)(input))
        .map(|rule| rule.label)
        .unwrap_or(fallback)
}

/// RSI zones in evaluation order; anything unmatched is `NeutralHigh`.
///
/// The bearish-momentum band overlaps the neutral-low and bullish-momentum ranges and
/// is only reached when the four exclusive ranges above it all fail.
pub const RSI_RULES: &[ClassificationRule<f64, RsiZone>] = &[
    ClassificationRule {
        label: RsiZone::Oversold,
        matches: rsi_oversold,
    },
    ClassificationRule {
        label: RsiZone::NeutralLow,
        matches: rsi_neutral_low,
    },
    ClassificationRule {
        label: RsiZone::BullishMomentum,
        matches: rsi_bullish_momentum,
    },
    ClassificationRule {
        label: RsiZone::Overbought,
        matches: rsi_overbought,
    },
    ClassificationRule {
        label: RsiZone::BearishMomentum,
        matches: rsi_bearish_momentum,
    },
];

fn rsi_oversold(rsi: &f64) -> bool {
    *rsi < 35.0
}

fn rsi_neutral_low(rsi: &f64) -> bool {
    (35.0..=45.0).contains(rsi)
}

fn rsi_bullish_momentum(rsi: &f64) -> bool {
    *rsi > 45.0 && *rsi <= 65.0
}

fn rsi_overbought(rsi: &f64) -> bool {
    *rsi > 65.0 && *rsi <= 100.0
}

fn rsi_bearish_momentum(rsi: &f64) -> bool {
    *rsi > 35.0 && *rsi <= 55.0
}

/// Everything the Bollinger rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandInput {
    pub price: f64,
    pub upper: f64,
    pub lower: f64,
    pub context: BandContext,
}

impl BandInput {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        Self {
            price: snapshot.price,
            upper: snapshot.bb_upper,
            lower: snapshot.bb_lower,
            context: snapshot.band_context,
        }
    }

    fn distance_to_upper_pct(&self) -> f64 {
        (self.upper - self.price) / self.price * 100.0
    }

    fn distance_to_lower_pct(&self) -> f64 {
        (self.price - self.lower) / self.price * 100.0
    }

    fn volume_above_average(&self) -> bool {
        self.context.current_volume > self.context.avg_volume_5
    }
}

/// Bollinger states in evaluation order; anything unmatched is `MidRange`.
pub const BOLLINGER_RULES: &[ClassificationRule<BandInput, BollingerState>] = &[
    ClassificationRule {
        label: BollingerState::ReboundLower,
        matches: rebound_lower,
    },
    ClassificationRule {
        label: BollingerState::BreakingUpper,
        matches: breaking_upper,
    },
    ClassificationRule {
        label: BollingerState::RejectingUpper,
        matches: rejecting_upper,
    },
    ClassificationRule {
        label: BollingerState::BreakingLower,
        matches: breaking_lower,
    },
];

fn rebound_lower(b: &BandInput) -> bool {
    b.distance_to_lower_pct() < BAND_PROXIMITY_PCT
        && (b.context.prev_low <= b.lower || b.context.prev_close <= b.lower)
}

fn breaking_upper(b: &BandInput) -> bool {
    b.price > b.upper && b.volume_above_average()
}

fn rejecting_upper(b: &BandInput) -> bool {
    b.distance_to_upper_pct() < BAND_PROXIMITY_PCT
        && b.context.prev_high >= b.upper
        && b.price < b.upper
}

fn breaking_lower(b: &BandInput) -> bool {
    b.price < b.lower && b.volume_above_average()
}

pub fn classify_ema_position(price: f64, ema21: f64, ema50: f64) -> EmaPosition {
    if price > ema21 && price > ema50 {
        EmaPosition::AboveBoth
    } else if price < ema21 && price < ema50 {
        EmaPosition::BelowBoth
    } else {
        EmaPosition::Between
    }
}

pub fn classify_ema_cross(ema21: f64, ema50: f64) -> EmaCross {
    if ema21 > ema50 {
        EmaCross::BullishCross
    } else {
        EmaCross::BearishCross
    }
}

pub fn classify_rsi(rsi: f64) -> RsiZone {
    first_match(RSI_RULES, &rsi, RsiZone::NeutralHigh)
}

pub fn classify_bollinger(input: &BandInput) -> BollingerState {
    first_match(BOLLINGER_RULES, input, BollingerState::MidRange)
}

pub fn classify_macd_line(macd_line: f64, macd_signal: f64) -> MacdLineState {
    if macd_line > macd_signal {
        MacdLineState::AboveSignal
    } else {
        MacdLineState::BelowSignal
    }
}

/// Positive histograms strengthen when the raw values rise twice in a row; negative
/// (or zero) ones when the magnitudes do.
pub fn classify_histogram(histogram: f64, prev: f64, prev2: f64) -> HistogramTrend {
    if histogram > 0.0 {
        if histogram > prev && prev > prev2 {
            HistogramTrend::BullishStrengthening
        } else {
            HistogramTrend::BullishWeakening
        }
    } else if histogram.abs() > prev.abs() && prev.abs() > prev2.abs() {
        HistogramTrend::BearishStrengthening
    } else {
        HistogramTrend::BearishWeakening
    }
}

pub fn classify_volume(volume: &VolumeStats) -> VolumeState {
    if volume.pct_change_current > VOLUME_CHANGE_PCT {
        if volume.bullish_count > volume.bearish_count {
            VolumeState::RisingOnBullish
        } else if volume.bearish_count > volume.bullish_count {
            VolumeState::RisingOnBearish
        } else {
            VolumeState::Rising
        }
    } else if volume.pct_change_current < -VOLUME_CHANGE_PCT {
        VolumeState::Falling
    } else {
        VolumeState::Normal
    }
}

pub fn classify_vwap(price: f64, vwap: f64) -> VwapSide {
    if price > vwap {
        VwapSide::Above
    } else {
        VwapSide::Below
    }
}

pub fn classify(snapshot: &IndicatorSnapshot) -> ClassificationSet {
    ClassificationSet {
        ema_position: classify_ema_position(snapshot.price, snapshot.ema21, snapshot.ema50),
        ema_cross: classify_ema_cross(snapshot.ema21, snapshot.ema50),
        rsi_zone: classify_rsi(snapshot.rsi),
        bollinger: classify_bollinger(&BandInput::from_snapshot(snapshot)),
        macd_line: classify_macd_line(snapshot.macd_line, snapshot.macd_signal),
        macd_histogram: classify_histogram(
            snapshot.macd_histogram,
            snapshot.macd_histogram_prev,
            snapshot.macd_histogram_prev2,
        ),
        volume: classify_volume(&snapshot.volume),
        vwap: classify_vwap(snapshot.price, snapshot.vwap),
    }
}
