//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the use cases behind the dashboard pages.

mod dataset;
mod screening;

pub use dataset::{DatasetService, DatasetSummary, RangeCompliance};
pub use screening::{ScreeningService, ScreeningTally};
