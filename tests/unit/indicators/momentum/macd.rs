//! Unit tests for MACD indicator

use perpwatch::indicators::momentum::{calculate_macd, calculate_macd_default, calculate_macd_series};

use crate::test_utils::{candles_from_closes, wave_candles, MINUTE_MS};

#[test]
fn test_macd_insufficient_data() {
    let candles = wave_candles(25, MINUTE_MS);
    assert!(calculate_macd_default(&candles).is_none());
}

#[test]
fn test_macd_zero_period_is_rejected() {
    let candles = wave_candles(60, MINUTE_MS);
    assert!(calculate_macd(&candles, 0, 26, 9).is_none());
}

#[test]
fn test_macd_of_constant_series_is_zero() {
    let candles = candles_from_closes(&[50.0; 40]);
    let macd = calculate_macd_default(&candles).unwrap();
    assert!(macd.macd.abs() < 1e-12);
    assert!(macd.signal.abs() < 1e-12);
    assert!(macd.histogram.abs() < 1e-12);
}

#[test]
fn test_histogram_is_line_minus_signal() {
    let candles = wave_candles(60, MINUTE_MS);
    let series = calculate_macd_series(&candles, 12, 26, 9);
    assert_eq!(series.line.len(), candles.len());
    for i in 0..series.line.len() {
        assert!((series.histogram[i] - (series.line[i] - series.signal[i])).abs() < 1e-12);
    }
}

#[test]
fn test_macd_reports_previous_histograms() {
    let candles = wave_candles(60, MINUTE_MS);
    let series = calculate_macd_series(&candles, 12, 26, 9);
    let macd = calculate_macd_default(&candles).unwrap();
    let n = series.histogram.len();

    assert_eq!(macd.period, (12, 26, 9));
    assert_eq!(macd.histogram, series.histogram[n - 1]);
    assert_eq!(macd.histogram_prev, series.histogram[n - 2]);
    assert_eq!(macd.histogram_prev2, series.histogram[n - 3]);
}

#[test]
fn test_missing_previous_histograms_read_as_zero() {
    let candles = candles_from_closes(&[10.0]);
    let macd = calculate_macd(&candles, 1, 1, 1).unwrap();
    assert_eq!(macd.histogram_prev, 0.0);
    assert_eq!(macd.histogram_prev2, 0.0);
}
