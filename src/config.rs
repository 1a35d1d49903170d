//! Environment-driven configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::snapshot::MIN_CANDLES;
use crate::models::indicators::VolumeMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Deployment environment name (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Knobs of the evaluation engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub volume_mode: VolumeMode,
    /// Closed candles counted for the bullish/bearish volume split.
    pub volume_lookback: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            volume_mode: VolumeMode::InProgress,
            volume_lookback: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Evaluate every trend timeframe and start a fresh state document.
    Initial,
    /// Re-evaluate timeframes with a newly closed candle and report changes.
    Update,
    /// Short-timeframe entry timing read.
    Timing,
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" | "1" => Ok(AnalysisMode::Initial),
            "update" | "2" => Ok(AnalysisMode::Update),
            "timing" | "3" => Ok(AnalysisMode::Timing),
            other => Err(format!("unknown analysis mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub symbol: String,
    pub candle_dir: PathBuf,
    pub state_file: PathBuf,
    pub candle_limit: usize,
    pub mode: AnalysisMode,
    pub engine: EngineConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbol: "ETHUSDT".to_string(),
            candle_dir: PathBuf::from("./data"),
            state_file: PathBuf::from("estado.json"),
            candle_limit: MIN_CANDLES,
            mode: AnalysisMode::Initial,
            engine: EngineConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Reads `SYMBOL`, `CANDLE_DIR`, `STATE_FILE`, `CANDLE_LIMIT`, `ANALYSIS_MODE`,
    /// `VOLUME_MODE` and `VOLUME_LOOKBACK` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let symbol = lookup("SYMBOL")
            .map(|s| s.trim().to_uppercase())
            .unwrap_or(defaults.symbol);
        if symbol.is_empty() {
            return Err(ConfigError::Invalid {
                key: "SYMBOL",
                reason: "must not be empty".to_string(),
            });
        }

        let candle_limit = match lookup("CANDLE_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "CANDLE_LIMIT",
                reason: e.to_string(),
            })?,
            None => defaults.candle_limit,
        };
        if candle_limit < MIN_CANDLES {
            return Err(ConfigError::Invalid {
                key: "CANDLE_LIMIT",
                reason: format!("must be at least {}, got {}", MIN_CANDLES, candle_limit),
            });
        }

        let mode = match lookup("ANALYSIS_MODE") {
            Some(raw) => raw
                .parse::<AnalysisMode>()
                .map_err(|reason| ConfigError::Invalid {
                    key: "ANALYSIS_MODE",
                    reason,
                })?,
            None => defaults.mode,
        };

        let volume_mode = match lookup("VOLUME_MODE")
            .map(|raw| raw.trim().to_lowercase())
            .as_deref()
        {
            None | Some("in_progress") => VolumeMode::InProgress,
            Some("last_closed") => VolumeMode::LastClosed,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "VOLUME_MODE",
                    reason: format!("expected in_progress or last_closed, got '{}'", other),
                })
            }
        };

        let volume_lookback = match lookup("VOLUME_LOOKBACK") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "VOLUME_LOOKBACK",
                reason: e.to_string(),
            })?,
            None => defaults.engine.volume_lookback,
        };

        Ok(Self {
            symbol,
            candle_dir: lookup("CANDLE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.candle_dir),
            state_file: lookup("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            candle_limit,
            mode,
            engine: EngineConfig {
                volume_mode,
                volume_lookback,
            },
        })
    }
}
