//! CSV adapter: Implementation of DatasetSource.
//!
//! Reads a headered CSV file into a [`DatasetTable`] with the polars CSV
//! reader. Every cell must be numeric or one of the missing-value markers
//! pandas recognises by default for this dataset (`NA`, `NaN`, empty, ...).

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::domain::{DatasetTable, TableError};
use crate::ports::DatasetSource;

/// Cell contents read as missing values.
const MISSING_MARKERS: [&str; 6] = ["", "NA", "N/A", "NaN", "nan", "null"];

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table: {0}")]
    Table(#[from] TableError),
}

/// CSV dataset loader.
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    delimiter: u8,
}

impl Default for CsvDatasetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetSource {
    /// Create a loader for comma-separated files.
    #[must_use]
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter (e.g. `b';'`).
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn read_options(&self) -> CsvReadOptions {
        let null_values = MISSING_MARKERS.iter().map(|m| PlSmallStr::from(*m)).collect();

        CsvReadOptions::default()
            .with_has_header(true)
            // Scan the whole file so a late decimal does not break an integer guess.
            .with_infer_schema_length(None)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(self.delimiter)
                    .with_null_values(Some(NullValues::AllColumns(null_values))),
            )
    }

    /// Parse CSV content held in memory.
    ///
    /// # Errors
    /// Returns error on malformed CSV or non-numeric cells.
    pub fn parse(&self, content: impl Into<Vec<u8>>) -> Result<DatasetTable, DatasetError> {
        let frame = self
            .read_options()
            .into_reader_with_file_handle(Cursor::new(content.into()))
            .finish()?;

        Ok(DatasetTable::new(frame)?)
    }
}

impl DatasetSource for CsvDatasetSource {
    type Error = DatasetError;

    fn load(&self, path: &Path) -> Result<DatasetTable, Self::Error> {
        if !path.is_file() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let table = self.parse(std::fs::read(path)?)?;

        tracing::info!(
            records = table.record_count(),
            features = table.feature_count(),
            "Loaded dataset from {}",
            path.display()
        );

        Ok(table)
    }
}
