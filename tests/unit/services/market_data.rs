//! Unit tests for the file-backed candle source

use std::fs;

use perpwatch::models::timeframe::Timeframe;
use perpwatch::services::market_data::{CandleSource, JsonFileCandleSource, SourceError};
use tempfile::TempDir;

use crate::test_utils::{wave_candles, MINUTE_MS};

fn write_candles(dir: &TempDir, name: &str, count: usize) -> Vec<perpwatch::models::indicators::Candle> {
    let candles = wave_candles(count, 15 * MINUTE_MS);
    fs::write(dir.path().join(name), serde_json::to_string(&candles).unwrap()).unwrap();
    candles
}

#[test]
fn test_path_uses_uppercase_symbol_and_interval() {
    let source = JsonFileCandleSource::new("/data");
    assert_eq!(
        source.path_for("ethusdt", Timeframe::M15),
        std::path::PathBuf::from("/data/ETHUSDT_15m.json")
    );
}

#[test]
fn test_fetch_keeps_most_recent_candles() {
    let dir = TempDir::new().unwrap();
    let candles = write_candles(&dir, "ETHUSDT_15m.json", 10);
    let source = JsonFileCandleSource::new(dir.path());

    let fetched = source.fetch_candles("ETHUSDT", Timeframe::M15, 4).unwrap();
    assert_eq!(fetched.len(), 4);
    assert_eq!(fetched, candles[6..].to_vec());

    let all = source.fetch_candles("ETHUSDT", Timeframe::M15, 50).unwrap();
    assert_eq!(all.len(), 10);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let source = JsonFileCandleSource::new(dir.path());
    let err = source.fetch_candles("ETHUSDT", Timeframe::H4, 50).unwrap_err();
    assert!(matches!(err, SourceError::NotFound(_)));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ETHUSDT_1h.json"), "[{\"open\": 1.0}]").unwrap();
    let source = JsonFileCandleSource::new(dir.path());
    let err = source.fetch_candles("ETHUSDT", Timeframe::H1, 50).unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
}

#[test]
fn test_unordered_candles_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut candles = wave_candles(5, MINUTE_MS);
    candles.swap(1, 3);
    fs::write(
        dir.path().join("ETHUSDT_5m.json"),
        serde_json::to_string(&candles).unwrap(),
    )
    .unwrap();
    let source = JsonFileCandleSource::new(dir.path());
    let err = source.fetch_candles("ETHUSDT", Timeframe::M5, 50).unwrap_err();
    assert!(matches!(err, SourceError::Unordered(_)));
}
