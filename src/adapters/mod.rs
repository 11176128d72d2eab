//! Adapters layer: Concrete implementations of ports.
//!
//! - `csv`: CSV dataset loading
//! - `sanitize`: measurement and contact-detail filtering for logs

pub mod csv;
pub mod sanitize;

pub use self::csv::{CsvDatasetSource, DatasetError};
