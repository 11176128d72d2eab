//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (dataset files).

mod dataset;

pub use dataset::DatasetSource;
