//! Unit tests for the analysis runtime

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use perpwatch::config::AnalysisConfig;
use perpwatch::core::runtime::{needs_update, AnalysisRuntime, RuntimeConfig, RuntimeError};
use perpwatch::models::indicators::Candle;
use perpwatch::models::timeframe::Timeframe;
use perpwatch::services::market_data::{CandleSource, SourceError};

use crate::test_utils::{persisted_state, wave_candles, MINUTE_MS};

/// Serves fixed candles per timeframe and records every request.
#[derive(Default)]
struct MemoryCandleSource {
    candles: HashMap<Timeframe, Vec<Candle>>,
    requests: Mutex<Vec<(String, Timeframe, usize)>>,
}

impl MemoryCandleSource {
    fn with_trend_candles(count: usize) -> Self {
        let mut candles = HashMap::new();
        for tf in Timeframe::TREND.iter().chain([Timeframe::M5].iter()) {
            candles.insert(*tf, wave_candles(count, tf.duration_ms()));
        }
        Self {
            candles,
            ..Self::default()
        }
    }
}

impl CandleSource for MemoryCandleSource {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, SourceError> {
        self.requests
            .lock()
            .unwrap()
            .push((symbol.to_string(), timeframe, limit));
        let candles = self
            .candles
            .get(&timeframe)
            .ok_or_else(|| SourceError::NotFound(timeframe.interval().into()))?;
        Ok(candles[candles.len().saturating_sub(limit)..].to_vec())
    }
}

fn runtime(source: MemoryCandleSource) -> (AnalysisRuntime, Arc<MemoryCandleSource>) {
    let source = Arc::new(source);
    let runtime = AnalysisRuntime::new(RuntimeConfig::default(), source.clone());
    (runtime, source)
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
}

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.symbol, "ETHUSDT");
    assert_eq!(config.candle_limit, 50);
}

#[test]
fn test_runtime_config_from_analysis_config() {
    let analysis = AnalysisConfig {
        symbol: "SOLUSDT".to_string(),
        candle_limit: 120,
        ..AnalysisConfig::default()
    };
    let config = RuntimeConfig::from(&analysis);
    assert_eq!(config.symbol, "SOLUSDT");
    assert_eq!(config.candle_limit, 120);
    assert_eq!(config.engine, analysis.engine);
}

#[test]
fn test_needs_update() {
    let state = persisted_state();
    assert!(needs_update(None, 123));
    assert!(!needs_update(Some(&state), state.last_candle_close_time));
    assert!(needs_update(Some(&state), state.last_candle_close_time + 1));
}

#[tokio::test]
async fn test_initial_run_covers_trend_timeframes() {
    let (runtime, source) = runtime(MemoryCandleSource::with_trend_candles(80));
    let initial = runtime.run_initial(now()).await.unwrap();

    assert_eq!(initial.analyses.len(), 3);
    let timeframes: Vec<Timeframe> = initial.analyses.iter().map(|a| a.timeframe).collect();
    assert_eq!(timeframes, Timeframe::TREND.to_vec());

    let keys: Vec<&str> = initial.state.timeframes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["15min", "1h", "4h"]);
    assert_eq!(initial.state.update_count, 0);
    assert_eq!(initial.state.initial_analysis_at, now());
    assert!(initial.state.validate().is_ok());

    let requests = source.requests.lock().unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|(symbol, _, limit)| symbol == "ETHUSDT" && *limit == 50));
}

#[tokio::test]
async fn test_initial_run_fails_when_a_timeframe_fails() {
    let mut source = MemoryCandleSource::with_trend_candles(80);
    source.candles.insert(Timeframe::H1, wave_candles(20, Timeframe::H1.duration_ms()));
    let (runtime, _) = runtime(source);

    let err = runtime.run_initial(now()).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Indicator {
            timeframe: Timeframe::H1,
            ..
        }
    ));
}

#[tokio::test]
async fn test_missing_candles_surface_as_source_error() {
    let mut source = MemoryCandleSource::with_trend_candles(80);
    source.candles.remove(&Timeframe::H4);
    let (runtime, _) = runtime(source);

    let err = runtime.run_initial(now()).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Source(SourceError::NotFound(_))));
}

#[tokio::test]
async fn test_update_requires_initial_analysis() {
    let (runtime, _) = runtime(MemoryCandleSource::with_trend_candles(80));
    let err = runtime.run_update(None, now()).await.unwrap_err();
    assert!(matches!(err, RuntimeError::NoInitialAnalysis));
}

#[tokio::test]
async fn test_update_skips_timeframes_without_new_candle() {
    let (runtime, _) = runtime(MemoryCandleSource::with_trend_candles(80));
    let initial = runtime.run_initial(now()).await.unwrap();

    let outcome = runtime
        .run_update(Some(initial.state.clone()), now())
        .await
        .unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.skipped.len(), 3);
    assert_eq!(outcome.state, initial.state);
}

#[tokio::test]
async fn test_update_reevaluates_changed_timeframe() {
    let (runtime, _) = runtime(MemoryCandleSource::with_trend_candles(80));
    let initial = runtime.run_initial(now()).await.unwrap();

    let mut state = initial.state.clone();
    if let Some(tf) = state.timeframes.get_mut("1h") {
        tf.last_candle_close_time -= Timeframe::H1.duration_ms();
    }
    let later = now() + chrono::Duration::minutes(5);

    let outcome = runtime.run_update(Some(state), later).await.unwrap();
    assert_eq!(outcome.updated.len(), 1);
    assert_eq!(outcome.updated[0].analysis.timeframe, Timeframe::H1);
    assert_eq!(outcome.skipped, vec![Timeframe::H4, Timeframe::M15]);
    assert_eq!(outcome.state.update_count, 1);
    assert_eq!(outcome.state.last_update_at, later);
    assert_eq!(outcome.state.timeframes, initial.state.timeframes);
    // Same candles, same values: only the bookkeeping moved.
    assert!(!outcome.updated[0].changes.has_changes);
}

#[tokio::test]
async fn test_entry_timing_reads_five_minute_candles() {
    let (runtime, source) = runtime(MemoryCandleSource::with_trend_candles(80));
    let timing = runtime.run_entry_timing(now()).await.unwrap();

    assert_eq!(timing.momentum.candle_kinds.len(), 3);
    let requests = source.requests.lock().unwrap();
    assert_eq!(requests.as_slice(), &[("ETHUSDT".to_string(), Timeframe::M5, 50)]);
}
