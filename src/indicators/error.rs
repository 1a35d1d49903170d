//! Indicator error types.

use thiserror::Error;

/// Errors raised by the indicator pipeline.
///
/// Division-by-zero cases (no losses in RSI, zero volume averages) are not errors;
/// they resolve to fixed sentinel values where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// The series is shorter than the longest window the pipeline needs.
    #[error("insufficient data: need {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl IndicatorError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }
}
