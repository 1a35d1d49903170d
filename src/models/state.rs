//! Persisted evaluation state and change reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::signal::{RiskLevels, CONDITION_COUNT};

/// Durable subset of one timeframe evaluation.
///
/// Every field is required on load; a document missing any of them is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersistedTimeframeState {
    pub price: f64,
    pub ema21: f64,
    pub ema50: f64,
    pub rsi: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub volume: f64,
    pub vwap: f64,
    pub atr: f64,
    pub long_count: usize,
    pub short_count: usize,
    pub long_conditions: [bool; CONDITION_COUNT],
    pub short_conditions: [bool; CONDITION_COUNT],
    pub sl_tp_long: Option<RiskLevels>,
    pub sl_tp_short: Option<RiskLevels>,
    pub last_candle_open_time: i64,
    pub last_candle_close_time: i64,
}

impl PersistedTimeframeState {
    /// Values tracked by the change detector, in report order.
    pub fn tracked_values(&self) -> [(&'static str, f64); 5] {
        [
            ("price", self.price),
            ("ema21", self.ema21),
            ("ema50", self.ema50),
            ("rsi", self.rsi),
            ("macd_histogram", self.macd_histogram),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        let numbers = [
            ("price", self.price),
            ("ema21", self.ema21),
            ("ema50", self.ema50),
            ("rsi", self.rsi),
            ("bb_upper", self.bb_upper),
            ("bb_middle", self.bb_middle),
            ("bb_lower", self.bb_lower),
            ("macd_line", self.macd_line),
            ("macd_signal", self.macd_signal),
            ("macd_histogram", self.macd_histogram),
            ("volume", self.volume),
            ("vwap", self.vwap),
            ("atr", self.atr),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{} is not a finite number: {}", name, value));
        }
        if self.price < 0.0 {
            return Err(format!("price must not be negative, got {}", self.price));
        }
        if !(0.0..=100.0).contains(&self.rsi) {
            return Err(format!("rsi out of range 0-100: {}", self.rsi));
        }

        let long_met = self.long_conditions.iter().filter(|&&c| c).count();
        if long_met != self.long_count {
            return Err(format!(
                "long_count {} does not match {} satisfied conditions",
                self.long_count, long_met
            ));
        }
        let short_met = self.short_conditions.iter().filter(|&&c| c).count();
        if short_met != self.short_count {
            return Err(format!(
                "short_count {} does not match {} satisfied conditions",
                self.short_count, short_met
            ));
        }

        if self.last_candle_close_time <= self.last_candle_open_time {
            return Err(format!(
                "last_candle_close_time {} must be after last_candle_open_time {}",
                self.last_candle_close_time, self.last_candle_open_time
            ));
        }
        Ok(())
    }
}

/// The whole persisted document, one entry per timeframe state key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisState {
    pub initial_analysis_at: DateTime<Utc>,
    pub update_count: u32,
    pub last_update_at: DateTime<Utc>,
    pub timeframes: BTreeMap<String, PersistedTimeframeState>,
}

impl AnalysisState {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            initial_analysis_at: at,
            update_count: 0,
            last_update_at: at,
            timeframes: BTreeMap::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (key, state) in &self.timeframes {
            state
                .validate()
                .map_err(|e| format!("timeframe {}: {}", key, e))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionFlip {
    pub index: usize,
    pub old: bool,
    pub new: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionChanges {
    pub long: Vec<ConditionFlip>,
    pub short: Vec<ConditionFlip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorChange {
    pub name: String,
    pub old: f64,
    pub new: f64,
    pub pct_change: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub has_changes: bool,
    pub long_count_changed: bool,
    pub short_count_changed: bool,
    pub old_long_count: usize,
    pub old_short_count: usize,
    pub condition_changes: ConditionChanges,
    pub indicator_changes: Vec<IndicatorChange>,
}
