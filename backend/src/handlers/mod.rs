//! HTTP handlers for the rain dashboard

pub mod analysis;
pub mod dashboard;
pub mod health;
pub mod prediction;

pub use analysis::*;
pub use dashboard::*;
pub use health::*;
pub use prediction::*;
