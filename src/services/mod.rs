//! External collaborators: candle supply and state persistence.

pub mod market_data;
pub mod state_store;

pub use market_data::{CandleSource, JsonFileCandleSource, SourceError};
pub use state_store::{StateError, StateStore};
