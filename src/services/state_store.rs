//! JSON persistence of `AnalysisState`

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::state::AnalysisState;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The document does not match the expected schema or holds invalid values.
    #[error("state schema error: {0}")]
    Schema(String),
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no state has been saved yet.
    pub fn load(&self) -> Result<Option<AnalysisState>, StateError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let state: AnalysisState =
            serde_json::from_str(&raw).map_err(|e| StateError::Schema(e.to_string()))?;
        state.validate().map_err(StateError::Schema)?;
        Ok(Some(state))
    }

    pub fn save(&self, state: &AnalysisState) -> Result<(), StateError> {
        state.validate().map_err(StateError::Schema)?;
        let json =
            serde_json::to_string_pretty(state).map_err(|e| StateError::Schema(e.to_string()))?;
        fs::write(&self.path, json)?;
        info!(
            path = %self.path.display(),
            timeframes = state.timeframes.len(),
            "state saved"
        );
        Ok(())
    }
}
