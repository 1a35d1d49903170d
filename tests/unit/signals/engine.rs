//! Unit tests for the signal engine

use perpwatch::config::EngineConfig;
use perpwatch::indicators::IndicatorError;
use perpwatch::models::indicators::IndicatorSnapshot;
use perpwatch::models::signal::{SignalDirection, SlLimit, TradeDirection};
use perpwatch::signals::engine::SignalEngine;

use crate::test_utils::{bullish_snapshot, wave_candles, MINUTE_MS};

fn bearish_snapshot() -> IndicatorSnapshot {
    let mut s = bullish_snapshot();
    s.price = 90.0;
    s.ema21 = 95.0;
    s.ema50 = 100.0;
    s.rsi = 40.0;
    s.macd_line = -2.0;
    s.macd_signal = -1.0;
    s.macd_histogram = -1.0;
    s.macd_histogram_prev = -0.5;
    s.macd_histogram_prev2 = -0.2;
    s.volume.bullish_count = 8;
    s.volume.bearish_count = 12;
    s
}

#[test]
fn test_evaluate_requires_enough_candles() {
    let candles = wave_candles(30, MINUTE_MS);
    let err = SignalEngine::evaluate(&candles, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, IndicatorError::InsufficientData { actual: 30, .. }));
}

#[test]
fn test_evaluate_candles_is_consistent() {
    let candles = wave_candles(100, 15 * MINUTE_MS);
    let evaluation = SignalEngine::evaluate(&candles, &EngineConfig::default()).unwrap();

    for vector in [&evaluation.long, &evaluation.short] {
        assert_eq!(vector.count, vector.conditions.iter().filter(|&&c| c).count());
    }
    assert_eq!(evaluation.risk_long.is_some(), evaluation.long.is_actionable());
    assert_eq!(evaluation.risk_short.is_some(), evaluation.short.is_actionable());
    assert!(evaluation.to_persisted().validate().is_ok());
}

#[test]
fn test_bullish_snapshot_yields_long_levels() {
    let evaluation = SignalEngine::evaluate_snapshot(bullish_snapshot()).unwrap();

    assert_eq!(evaluation.bias(), SignalDirection::Long);
    assert!(evaluation.risk_short.is_none());
    let risk = evaluation.active_risk().unwrap();
    assert_eq!(risk.direction, TradeDirection::Long);
    // 2 * 2 / 110 is above the 3% cap.
    assert_eq!(risk.limit_applied, SlLimit::Max);
    assert!(risk.stop_loss < risk.entry_price);
}

#[test]
fn test_bearish_snapshot_yields_short_levels() {
    let evaluation = SignalEngine::evaluate_snapshot(bearish_snapshot()).unwrap();

    assert_eq!(evaluation.short.count, 7);
    assert_eq!(evaluation.long.count, 0);
    assert_eq!(evaluation.bias(), SignalDirection::Short);
    let risk = evaluation.active_risk().unwrap();
    assert_eq!(risk.direction, TradeDirection::Short);
    assert!(risk.stop_loss > risk.entry_price);
    assert!(risk.take_profit_2 < risk.take_profit_1);
}

#[test]
fn test_neutral_when_neither_side_is_actionable() {
    let mut snapshot = bullish_snapshot();
    snapshot.rsi = 70.0;
    snapshot.vwap = 120.0;
    snapshot.ema21 = 99.0;
    let evaluation = SignalEngine::evaluate_snapshot(snapshot).unwrap();

    assert_eq!(evaluation.bias(), SignalDirection::Neutral);
    assert!(evaluation.active_risk().is_none());
    assert!(evaluation.risk_long.is_none());
}

#[test]
fn test_persisted_state_mirrors_evaluation() {
    let evaluation = SignalEngine::evaluate_snapshot(bullish_snapshot()).unwrap();
    let persisted = evaluation.to_persisted();

    assert_eq!(persisted.price, 110.0);
    assert_eq!(persisted.volume, 1500.0);
    assert_eq!(persisted.long_count, 7);
    assert_eq!(persisted.long_conditions, evaluation.long.conditions);
    assert_eq!(persisted.sl_tp_long, evaluation.risk_long);
    assert!(persisted.sl_tp_short.is_none());
    assert!(persisted.validate().is_ok());
}
