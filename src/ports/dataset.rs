//! Dataset port: Trait for loading tabular datasets.
//!
//! This trait abstracts the file format (CSV) from the application logic.

use std::path::Path;

use crate::domain::DatasetTable;

/// Trait for dataset loading.
///
/// Loading is the only I/O the dashboard performs; everything downstream
/// works on the in-memory [`DatasetTable`].
pub trait DatasetSource: Send + Sync {
    /// Error type for load operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the dataset stored at `path`.
    ///
    /// # Errors
    /// Returns error if the file is missing, unreadable, or malformed.
    fn load(&self, path: &Path) -> Result<DatasetTable, Self::Error>;
}
