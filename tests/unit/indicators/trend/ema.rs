//! Unit tests for EMA indicator

use perpwatch::indicators::trend::{calculate_ema, calculate_ema_series, calculate_emas};

use crate::test_utils::{candles_from_closes, wave_candles, MINUTE_MS};

#[test]
fn test_ema_insufficient_data() {
    let candles = candles_from_closes(&[100.0, 101.0]);
    assert!(calculate_ema(&candles, 3).is_none());
}

#[test]
fn test_ema_known_values() {
    let candles = candles_from_closes(&[100.0, 102.0, 102.0]);
    let series = calculate_ema_series(&candles, 3);
    assert_eq!(series, vec![100.0, 101.0, 101.5]);

    let ema = calculate_ema(&candles, 3).unwrap();
    assert_eq!(ema.period, 3);
    assert!((ema.value - 101.5).abs() < 1e-9);
}

#[test]
fn test_calculate_multiple_emas_skips_unavailable_periods() {
    let candles = wave_candles(30, MINUTE_MS);
    let emas = calculate_emas(&candles, &[9, 21, 50]);
    assert_eq!(emas.len(), 2);
    assert_eq!(emas[0].period, 9);
    assert_eq!(emas[1].period, 21);
}

#[test]
fn test_ema_of_constant_series_is_constant() {
    let candles = candles_from_closes(&[42.0; 25]);
    let ema = calculate_ema(&candles, 21).unwrap();
    assert!((ema.value - 42.0).abs() < 1e-9);
}

#[test]
fn test_ema_follows_seeded_recurrence() {
    let closes = [100.0, 102.0, 101.0, 105.0, 107.0, 110.0, 108.0, 112.0, 115.0, 117.0];
    let series = calculate_ema_series(&candles_from_closes(&closes), 3);
    let expected = [
        100.0, 101.0, 101.0, 103.0, 105.0, 107.5, 107.75, 109.875, 112.4375, 114.71875,
    ];
    for (actual, expected) in series.iter().zip(expected.iter()) {
        assert!((actual - expected).abs() < 1e-9);
    }
}

#[test]
fn test_rising_series_orders_price_above_fast_above_slow() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
    let candles = candles_from_closes(&closes);
    let fast = calculate_ema_series(&candles, 21);
    let slow = calculate_ema_series(&candles, 50);

    assert!(fast.windows(2).all(|w| w[1] > w[0]));
    assert!(slow.windows(2).all(|w| w[1] > w[0]));
    let price = *closes.last().unwrap();
    assert!(price > *fast.last().unwrap());
    assert!(fast.last().unwrap() > slow.last().unwrap());
}
