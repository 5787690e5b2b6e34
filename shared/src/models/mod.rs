//! Domain models for the rain dashboard

mod history;
mod observation;
mod prediction;

pub use history::*;
pub use observation::*;
pub use prediction::*;
