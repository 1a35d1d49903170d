use serde::{Deserialize, Serialize};

use crate::models::classification::ClassificationSet;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::state::PersistedTimeframeState;

/// Number of rules evaluated per side.
pub const CONDITION_COUNT: usize = 7;

/// A side counts as a signal once this many rules hold.
pub const ACTIONABLE_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Long,
    Short,
    Neutral,
}

/// Which clamp, if any, was applied to the stop-loss percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlLimit {
    None,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub direction: TradeDirection,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub sl_pct: f64,
    pub tp1_pct: f64,
    pub tp2_pct: f64,
    pub sl_base_pct: f64,
    pub limit_applied: SlLimit,
    pub risk_reward_tp1: f64,
    pub risk_reward_tp2: f64,
    pub atr_value: f64,
}

/// The seven rule outcomes for one side, in fixed rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionVector {
    pub direction: TradeDirection,
    pub conditions: [bool; CONDITION_COUNT],
    pub count: usize,
}

impl ConditionVector {
    pub fn new(direction: TradeDirection, conditions: [bool; CONDITION_COUNT]) -> Self {
        let count = conditions.iter().filter(|&&met| met).count();
        Self {
            direction,
            conditions,
            count,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.count >= ACTIONABLE_THRESHOLD
    }
}

/// Full result of evaluating one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvaluation {
    pub snapshot: IndicatorSnapshot,
    pub classification: ClassificationSet,
    pub long: ConditionVector,
    pub short: ConditionVector,
    pub risk_long: Option<RiskLevels>,
    pub risk_short: Option<RiskLevels>,
}

impl SignalEvaluation {
    /// The actionable side, long taking precedence.
    pub fn bias(&self) -> SignalDirection {
        if self.long.is_actionable() {
            SignalDirection::Long
        } else if self.short.is_actionable() {
            SignalDirection::Short
        } else {
            SignalDirection::Neutral
        }
    }

    /// Risk levels for the current bias, if any.
    pub fn active_risk(&self) -> Option<&RiskLevels> {
        match self.bias() {
            SignalDirection::Long => self.risk_long.as_ref(),
            SignalDirection::Short => self.risk_short.as_ref(),
            SignalDirection::Neutral => None,
        }
    }

    pub fn to_persisted(&self) -> PersistedTimeframeState {
        let s = &self.snapshot;
        PersistedTimeframeState {
            price: s.price,
            ema21: s.ema21,
            ema50: s.ema50,
            rsi: s.rsi,
            bb_upper: s.bb_upper,
            bb_middle: s.bb_middle,
            bb_lower: s.bb_lower,
            macd_line: s.macd_line,
            macd_signal: s.macd_signal,
            macd_histogram: s.macd_histogram,
            volume: s.volume.current,
            vwap: s.vwap,
            atr: s.atr,
            long_count: self.long.count,
            short_count: self.short.count,
            long_conditions: self.long.conditions,
            short_conditions: self.short.conditions,
            sl_tp_long: self.risk_long,
            sl_tp_short: self.risk_short,
            last_candle_open_time: s.candle_open_time,
            last_candle_close_time: s.candle_close_time,
        }
    }
}
