//! Domain models for the vitals-risk system.

mod disease;
mod patient;
mod prediction;

pub use disease::*;
pub use patient::*;
pub use prediction::*;
