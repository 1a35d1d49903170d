//! Main signal evaluation engine.

use tracing::debug;

use crate::config::EngineConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::snapshot::calculate_snapshot;
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::signal::{SignalEvaluation, TradeDirection};
use crate::signals::classifier;
use crate::signals::conditions;
use crate::signals::decision::StopLossTakeProfit;

pub struct SignalEngine;

impl SignalEngine {
    /// Indicators, states, both condition vectors and, for each actionable side, its
    /// risk levels. Fails with `InsufficientData` on short series.
    pub fn evaluate(
        candles: &[Candle],
        config: &EngineConfig,
    ) -> Result<SignalEvaluation, IndicatorError> {
        let snapshot = calculate_snapshot(candles, config)?;
        Self::evaluate_snapshot(snapshot)
    }

    pub fn evaluate_snapshot(
        snapshot: IndicatorSnapshot,
    ) -> Result<SignalEvaluation, IndicatorError> {
        let classification = classifier::classify(&snapshot);
        let long = conditions::evaluate_long(&snapshot, &classification);
        let short = conditions::evaluate_short(&snapshot, &classification);

        let risk_long = if long.is_actionable() {
            Some(StopLossTakeProfit::calculate(
                snapshot.price,
                snapshot.atr,
                TradeDirection::Long,
            )?)
        } else {
            None
        };
        let risk_short = if short.is_actionable() {
            Some(StopLossTakeProfit::calculate(
                snapshot.price,
                snapshot.atr,
                TradeDirection::Short,
            )?)
        } else {
            None
        };

        debug!(
            long_count = long.count,
            short_count = short.count,
            "conditions evaluated"
        );

        Ok(SignalEvaluation {
            snapshot,
            classification,
            long,
            short,
            risk_long,
            risk_short,
        })
    }
}
