//! Unit tests for persisted state validation

use chrono::{TimeZone, Utc};
use perpwatch::models::state::{AnalysisState, PersistedTimeframeState};

use crate::test_utils::persisted_state;

#[test]
fn test_valid_state_passes() {
    assert!(persisted_state().validate().is_ok());
}

#[test]
fn test_rsi_out_of_range_fails() {
    let mut state = persisted_state();
    state.rsi = 101.0;
    assert!(state.validate().unwrap_err().contains("rsi"));
}

#[test]
fn test_count_must_match_conditions() {
    let mut state = persisted_state();
    state.long_count = 5;
    assert!(state.validate().unwrap_err().contains("long_count"));
}

#[test]
fn test_zero_price_is_valid() {
    let mut state = persisted_state();
    state.price = 0.0;
    assert!(state.validate().is_ok());

    state.price = -0.5;
    assert!(state.validate().unwrap_err().contains("price"));
}

#[test]
fn test_non_finite_value_fails() {
    let mut state = persisted_state();
    state.atr = f64::NAN;
    assert!(state.validate().unwrap_err().contains("atr"));
}

#[test]
fn test_close_time_must_follow_open_time() {
    let mut state = persisted_state();
    state.last_candle_close_time = state.last_candle_open_time;
    assert!(state.validate().is_err());
}

#[test]
fn test_missing_field_is_rejected_on_load() {
    let mut value = serde_json::to_value(persisted_state()).unwrap();
    value.as_object_mut().unwrap().remove("rsi");
    let result: Result<PersistedTimeframeState, _> = serde_json::from_value(value);
    assert!(result.unwrap_err().to_string().contains("rsi"));
}

#[test]
fn test_unknown_field_is_rejected_on_load() {
    let mut value = serde_json::to_value(persisted_state()).unwrap();
    value
        .as_object_mut()
        .unwrap()
        .insert("funding_rate".to_string(), serde_json::json!(0.01));
    let result: Result<PersistedTimeframeState, _> = serde_json::from_value(value);
    assert!(result.is_err());
}

#[test]
fn test_analysis_state_reports_failing_timeframe() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let mut state = AnalysisState::new(at);
    assert_eq!(state.update_count, 0);
    assert_eq!(state.last_update_at, at);

    let mut bad = persisted_state();
    bad.price = -1.0;
    state.timeframes.insert("1h".to_string(), persisted_state());
    state.timeframes.insert("4h".to_string(), bad);

    let err = state.validate().unwrap_err();
    assert!(err.starts_with("timeframe 4h"));
}
