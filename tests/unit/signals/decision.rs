//! Unit tests for stop-loss / take-profit levels

use perpwatch::indicators::IndicatorError;
use perpwatch::models::signal::{SlLimit, TradeDirection};
use perpwatch::signals::decision::StopLossTakeProfit;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_long_levels_capped_at_max() {
    let levels = StopLossTakeProfit::calculate(1000.0, 20.0, TradeDirection::Long).unwrap();

    assert_close(levels.sl_base_pct, 4.0);
    assert_eq!(levels.limit_applied, SlLimit::Max);
    assert_close(levels.sl_pct, 3.0);
    assert_close(levels.tp1_pct, 4.5);
    assert_close(levels.tp2_pct, 6.75);
    assert_close(levels.stop_loss, 970.0);
    assert_close(levels.take_profit_1, 1045.0);
    assert_close(levels.take_profit_2, 1067.5);
    assert_eq!(levels.risk_reward_tp1, 1.5);
    assert_eq!(levels.risk_reward_tp2, 2.25);
    assert_eq!(levels.atr_value, 20.0);
}

#[test]
fn test_short_levels_mirror_long() {
    let levels = StopLossTakeProfit::calculate(1000.0, 20.0, TradeDirection::Short).unwrap();
    assert_eq!(levels.direction, TradeDirection::Short);
    assert_close(levels.stop_loss, 1030.0);
    assert_close(levels.take_profit_1, 955.0);
    assert_close(levels.take_profit_2, 932.5);
}

#[test]
fn test_tight_atr_raised_to_min() {
    let levels = StopLossTakeProfit::calculate(1000.0, 5.0, TradeDirection::Long).unwrap();
    assert_close(levels.sl_base_pct, 1.0);
    assert_eq!(levels.limit_applied, SlLimit::Min);
    assert_close(levels.sl_pct, 1.5);
    assert_close(levels.stop_loss, 985.0);
}

#[test]
fn test_atr_inside_band_is_unclamped() {
    let levels = StopLossTakeProfit::calculate(1000.0, 10.0, TradeDirection::Long).unwrap();
    assert_eq!(levels.limit_applied, SlLimit::None);
    assert_close(levels.sl_pct, 2.0);
    assert_close(levels.stop_loss, 980.0);
    assert!(levels.stop_loss < levels.entry_price);
    assert!(levels.entry_price < levels.take_profit_1);
    assert!(levels.take_profit_1 < levels.take_profit_2);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let err = StopLossTakeProfit::calculate(0.0, 10.0, TradeDirection::Long).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidParams(_)));

    let err = StopLossTakeProfit::calculate(100.0, -1.0, TradeDirection::Short).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidParams(_)));

    assert!(StopLossTakeProfit::calculate(f64::NAN, 1.0, TradeDirection::Long).is_err());
}
