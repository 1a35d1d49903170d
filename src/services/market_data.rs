//! Candle source interface and a file-backed implementation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::indicators::Candle;
use crate::models::timeframe::Timeframe;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("candle file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed candle data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("candles in {0} are not sorted by open time")]
    Unordered(PathBuf),
}

/// Supplies time-ordered candles, the in-progress candle last.
pub trait CandleSource {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, SourceError>;
}

/// Reads `{dir}/{SYMBOL}_{interval}.json`, a JSON array of candles.
pub struct JsonFileCandleSource {
    dir: PathBuf,
}

impl JsonFileCandleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", symbol.to_uppercase(), timeframe.interval()))
    }

    fn read(path: &Path) -> Result<Vec<Candle>, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let candles: Vec<Candle> =
            serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if candles.windows(2).any(|w| w[1].open_time < w[0].open_time) {
            return Err(SourceError::Unordered(path.to_path_buf()));
        }
        Ok(candles)
    }
}

impl CandleSource for JsonFileCandleSource {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, SourceError> {
        let path = self.path_for(symbol, timeframe);
        let mut candles = Self::read(&path)?;
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        debug!(symbol, timeframe = %timeframe, count = candles.len(), "candles loaded");
        Ok(candles)
    }
}
