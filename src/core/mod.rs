//! Analysis orchestration across timeframes

pub mod runtime;

pub use runtime::*;
