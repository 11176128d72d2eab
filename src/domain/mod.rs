//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. Measurements are validated against the
//! plausible ranges observed in the cleaned diabetes dataset.

mod bmi;
mod dataset;
mod profile;
pub mod ranges;

pub use bmi::{BmiCalculator, BmiCategory, BmiError};
pub use dataset::{ColumnSummary, DatasetTable, TableError};
pub use profile::{CoreFeatures, HealthProfile, HealthProfileBuilder, ProfileDict, ProfileError};
pub(crate) use profile::whole_i64;
pub use ranges::{valid_range, HealthField, ValidRange};
