//! # Glycoscope
//!
//! Terminal dashboard and validation toolkit for the Pima diabetes dataset.
//!
//! This crate provides:
//! - Range validation of individual health profiles
//! - A BMI calculator
//! - Dataset summaries (counts, data quality, descriptive statistics)
//! - Terminal UI for exploring the dataset
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (HealthProfile, RangeTable, BMI, tables)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (CSV loading, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{BmiCalculator, BmiCategory, HealthField, HealthProfile, ProfileDict};

/// Result type for Glycoscope operations
pub type Result<T> = std::result::Result<T, GlycoscopeError>;

/// Main error type for Glycoscope
#[derive(Debug, thiserror::Error)]
pub enum GlycoscopeError {
    #[error("Invalid health profile: {0}")]
    Profile(#[from] domain::ProfileError),

    #[error("Invalid BMI input: {0}")]
    Bmi(#[from] domain::BmiError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] adapters::DatasetError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
