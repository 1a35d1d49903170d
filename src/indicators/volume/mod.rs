//! Volume indicators: session VWAP, volume statistics, recent candle momentum

pub mod momentum;
pub mod stats;
pub mod vwap;

pub use momentum::*;
pub use stats::*;
pub use vwap::*;
