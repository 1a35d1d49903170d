//! Multi-timeframe analysis runtime
//!
//! Timeframes are independent, so each one is fetched and evaluated on its own
//! blocking task. The engine work inside a task is synchronous.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};

use crate::config::{AnalysisConfig, EngineConfig};
use crate::indicators::error::IndicatorError;
use crate::indicators::snapshot::MIN_CANDLES;
use crate::models::indicators::{Candle, CandleCompletion};
use crate::models::signal::SignalEvaluation;
use crate::models::state::{AnalysisState, ChangeReport, PersistedTimeframeState};
use crate::models::timeframe::Timeframe;
use crate::services::market_data::{CandleSource, SourceError};
use crate::signals::changes::detect_changes;
use crate::signals::engine::SignalEngine;
use crate::signals::timing::{analyze_entry_timing, EntryTiming};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{timeframe}: {source}")]
    Indicator {
        timeframe: Timeframe,
        #[source]
        source: IndicatorError,
    },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("evaluation task failed: {0}")]
    Join(#[from] task::JoinError),
    #[error("no initial analysis found, run the initial analysis first")]
    NoInitialAnalysis,
}

/// Configuration for the analysis runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub symbol: String,
    pub candle_limit: usize,
    pub engine: EngineConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbol: "ETHUSDT".to_string(),
            candle_limit: MIN_CANDLES,
            engine: EngineConfig::default(),
        }
    }
}

impl From<&AnalysisConfig> for RuntimeConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            candle_limit: config.candle_limit,
            engine: config.engine,
        }
    }
}

/// Evaluation of one timeframe together with its in-progress candle's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeframeAnalysis {
    pub timeframe: Timeframe,
    pub evaluation: SignalEvaluation,
    pub completion: CandleCompletion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitialAnalysis {
    pub state: AnalysisState,
    pub analyses: Vec<TimeframeAnalysis>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeframeUpdate {
    pub analysis: TimeframeAnalysis,
    pub changes: ChangeReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub state: AnalysisState,
    pub updated: Vec<TimeframeUpdate>,
    /// Timeframes whose latest candle has not closed since the last run.
    pub skipped: Vec<Timeframe>,
}

impl UpdateOutcome {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
    }
}

/// A timeframe is re-evaluated when it has never been evaluated or when the latest
/// candle's close time differs from the persisted one.
pub fn needs_update(old: Option<&PersistedTimeframeState>, latest_close_time: i64) -> bool {
    match old {
        Some(state) => state.last_candle_close_time != latest_close_time,
        None => true,
    }
}

pub struct AnalysisRuntime {
    config: RuntimeConfig,
    source: Arc<dyn CandleSource + Send + Sync>,
}

impl AnalysisRuntime {
    pub fn new(config: RuntimeConfig, source: Arc<dyn CandleSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Evaluates every trend timeframe and starts a fresh state document.
    pub async fn run_initial(&self, now: DateTime<Utc>) -> Result<InitialAnalysis, RuntimeError> {
        let candles = self.fetch_all(&Timeframe::TREND).await?;
        let analyses = self.evaluate_all(candles, now.timestamp_millis()).await?;

        let mut state = AnalysisState::new(now);
        for analysis in &analyses {
            state.timeframes.insert(
                analysis.timeframe.state_key().to_string(),
                analysis.evaluation.to_persisted(),
            );
        }

        info!(
            symbol = %self.config.symbol,
            timeframes = analyses.len(),
            "initial analysis complete"
        );
        Ok(InitialAnalysis { state, analyses })
    }

    /// Re-evaluates the trend timeframes that have a newly closed candle and diffs
    /// them against the persisted state. Other timeframes keep their old state.
    pub async fn run_update(
        &self,
        state: Option<AnalysisState>,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome, RuntimeError> {
        let mut state = state.ok_or(RuntimeError::NoInitialAnalysis)?;
        let fetched = self.fetch_all(&Timeframe::TREND).await?;

        let mut to_evaluate = Vec::new();
        let mut skipped = Vec::new();
        for (timeframe, candles) in fetched {
            let old = state.timeframes.get(timeframe.state_key());
            let latest_close = candles.last().map(|c| c.close_time);
            match latest_close {
                Some(close_time) if !needs_update(old, close_time) => {
                    info!(timeframe = %timeframe, "candle still in progress, skipping");
                    skipped.push(timeframe);
                }
                _ => to_evaluate.push((timeframe, candles)),
            }
        }

        if to_evaluate.is_empty() {
            warn!("no timeframe has a newly closed candle");
            return Ok(UpdateOutcome {
                state,
                updated: Vec::new(),
                skipped,
            });
        }

        let analyses = self.evaluate_all(to_evaluate, now.timestamp_millis()).await?;

        let mut updated = Vec::with_capacity(analyses.len());
        for analysis in analyses {
            let key = analysis.timeframe.state_key().to_string();
            let persisted = analysis.evaluation.to_persisted();
            let changes = detect_changes(state.timeframes.get(&key), &persisted);
            info!(
                timeframe = %analysis.timeframe,
                long_count = persisted.long_count,
                short_count = persisted.short_count,
                has_changes = changes.has_changes,
                "timeframe updated"
            );
            state.timeframes.insert(key, persisted);
            updated.push(TimeframeUpdate { analysis, changes });
        }

        state.update_count += 1;
        state.last_update_at = now;

        Ok(UpdateOutcome {
            state,
            updated,
            skipped,
        })
    }

    /// Entry timing read on the 5 minute timeframe.
    pub async fn run_entry_timing(&self, now: DateTime<Utc>) -> Result<EntryTiming, RuntimeError> {
        let timeframe = Timeframe::M5;
        let mut fetched = self.fetch_all(&[timeframe]).await?;
        let (_, candles) = fetched.pop().ok_or(RuntimeError::Indicator {
            timeframe,
            source: IndicatorError::InsufficientData {
                required: MIN_CANDLES,
                actual: 0,
            },
        })?;

        let engine = self.config.engine;
        let now_ms = now.timestamp_millis();
        let timing = task::spawn_blocking(move || analyze_entry_timing(&candles, &engine, now_ms))
            .await?
            .map_err(|source| RuntimeError::Indicator { timeframe, source })?;
        Ok(timing)
    }

    async fn fetch_all(
        &self,
        timeframes: &[Timeframe],
    ) -> Result<Vec<(Timeframe, Vec<Candle>)>, RuntimeError> {
        let handles: Vec<(Timeframe, JoinHandle<Result<Vec<Candle>, SourceError>>)> = timeframes
            .iter()
            .map(|&timeframe| {
                let source = Arc::clone(&self.source);
                let symbol = self.config.symbol.clone();
                let limit = self.config.candle_limit;
                let handle = task::spawn_blocking(move || {
                    source.fetch_candles(&symbol, timeframe, limit)
                });
                (timeframe, handle)
            })
            .collect();

        let mut fetched = Vec::with_capacity(handles.len());
        for (timeframe, handle) in handles {
            fetched.push((timeframe, handle.await??));
        }
        Ok(fetched)
    }

    async fn evaluate_all(
        &self,
        candles: Vec<(Timeframe, Vec<Candle>)>,
        now_ms: i64,
    ) -> Result<Vec<TimeframeAnalysis>, RuntimeError> {
        let engine = self.config.engine;
        let handles: Vec<(Timeframe, JoinHandle<Result<TimeframeAnalysis, IndicatorError>>)> =
            candles
                .into_iter()
                .map(|(timeframe, candles)| {
                    let handle = task::spawn_blocking(move || {
                        evaluate_timeframe(timeframe, &candles, &engine, now_ms)
                    });
                    (timeframe, handle)
                })
                .collect();

        let mut analyses = Vec::with_capacity(handles.len());
        for (timeframe, handle) in handles {
            let analysis = handle
                .await?
                .map_err(|source| RuntimeError::Indicator { timeframe, source })?;
            analyses.push(analysis);
        }
        Ok(analyses)
    }
}

fn evaluate_timeframe(
    timeframe: Timeframe,
    candles: &[Candle],
    engine: &EngineConfig,
    now_ms: i64,
) -> Result<TimeframeAnalysis, IndicatorError> {
    let evaluation = SignalEngine::evaluate(candles, engine)?;
    let completion = candles
        .last()
        .map(|c| c.completion(now_ms))
        .ok_or(IndicatorError::InsufficientData {
            required: MIN_CANDLES,
            actual: 0,
        })?;
    Ok(TimeframeAnalysis {
        timeframe,
        evaluation,
        completion,
    })
}
