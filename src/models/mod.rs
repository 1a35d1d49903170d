//! Shared data models spanning the engine layers.

pub mod classification;
pub mod indicators;
pub mod signal;
pub mod state;
pub mod timeframe;

pub use classification::{
    BollingerState, ClassificationSet, EmaCross, EmaPosition, HistogramTrend, MacdLineState,
    RsiZone, VolumeState, VwapSide,
};
pub use indicators::{
    BandContext, Candle, CandleCompletion, IndicatorSnapshot, VolumeMode, VolumeStats,
};
pub use signal::{
    ConditionVector, RiskLevels, SignalDirection, SignalEvaluation, SlLimit, TradeDirection,
    ACTIONABLE_THRESHOLD, CONDITION_COUNT,
};
pub use state::{
    AnalysisState, ChangeReport, ConditionChanges, ConditionFlip, IndicatorChange,
    PersistedTimeframeState,
};
pub use timeframe::{ParseTimeframeError, Timeframe};
