//! Signal evaluation: classification, conditions, risk levels, change detection.

pub mod changes;
pub mod classifier;
pub mod conditions;
pub mod decision;
pub mod engine;
pub mod timing;

pub use changes::*;
pub use classifier::*;
pub use conditions::*;
pub use decision::*;
pub use engine::*;
pub use timing::*;
