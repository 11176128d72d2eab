//! Tabular dataset backed by a polars `DataFrame`.
//!
//! Every column is held as `Float64`; nulls are missing cells. Counts,
//! previews and descriptive statistics are delegated to polars.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Errors raised while building a [`DatasetTable`].
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Row {row}, column {column}: '{value}' is not numeric")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Dataframe error: {0}")]
    Polars(#[from] PolarsError),
}

/// Numeric table; a null marks a missing cell.
#[derive(Debug, Clone, Default)]
pub struct DatasetTable {
    frame: DataFrame,
}

/// Descriptive statistics for one column, in the layout of `describe()`.
///
/// Missing cells are ignored. Statistics that are undefined for the
/// available values are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator)
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl DatasetTable {
    /// Wrap a frame, casting every column to `Float64`.
    ///
    /// Data rows are numbered from 1 in error messages.
    ///
    /// # Errors
    /// Returns error if a present cell cannot be read as a number.
    pub fn new(frame: DataFrame) -> Result<Self, TableError> {
        let columns = frame
            .get_columns()
            .iter()
            .map(|column| to_float(column.as_materialized_series()).map(Column::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            frame: DataFrame::new(columns)?,
        })
    }

    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.frame.height()
    }

    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.frame.width()
    }

    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.record_count() * self.feature_count()
    }

    #[must_use]
    pub fn missing_cells(&self) -> usize {
        self.frame.get_columns().iter().map(Column::null_count).sum()
    }

    /// Share of present cells as a percentage, rounded to one decimal
    /// with ties to even.
    ///
    /// A table with no cells reports 0.
    #[must_use]
    pub fn data_quality_percent(&self) -> f64 {
        let total = self.total_cells();
        if total == 0 {
            return 0.0;
        }
        let quality = (1.0 - self.missing_cells() as f64 / total as f64) * 100.0;
        (quality * 10.0).round_ties_even() / 10.0
    }

    /// The first `n` rows.
    #[must_use]
    pub fn preview(&self, n: usize) -> DatasetTable {
        Self {
            frame: self.frame.head(Some(n)),
        }
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<f64>>> {
        let columns: Vec<&Float64Chunked> = self.float_columns().map(|(_, ca)| ca).collect();
        (0..self.record_count())
            .map(|row| columns.iter().map(|ca| ca.get(row)).collect())
            .collect()
    }

    /// Present values of the named column, in row order.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Vec<f64> {
        self.frame
            .column(name)
            .ok()
            .and_then(|column| column.as_materialized_series().f64().ok())
            .map(|ca| ca.into_iter().flatten().collect())
            .unwrap_or_default()
    }

    /// Per-column descriptive statistics.
    #[must_use]
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.float_columns()
            .map(|(name, ca)| summarize(name, ca))
            .collect()
    }

    // Every column is Float64 once `new` has run.
    fn float_columns(&self) -> impl Iterator<Item = (&str, &Float64Chunked)> {
        self.frame.get_columns().iter().filter_map(|column| {
            let ca = column.as_materialized_series().f64().ok()?;
            Some((column.name().as_str(), ca))
        })
    }
}

/// Cast a column to `Float64`, reporting the first cell that does not parse.
fn to_float(series: &Series) -> Result<Series, TableError> {
    let cast = series.cast(&DataType::Float64)?;
    if cast.null_count() == series.null_count() {
        return Ok(cast);
    }

    let strings = series.str()?;
    let numbers = cast.f64()?;
    let bad = strings
        .into_iter()
        .zip(numbers)
        .enumerate()
        .find_map(|(index, pair)| match pair {
            (Some(value), None) => Some((index, value.to_string())),
            _ => None,
        });

    match bad {
        Some((index, value)) => Err(TableError::NonNumeric {
            row: index + 1,
            column: series.name().to_string(),
            value,
        }),
        None => Ok(cast),
    }
}

fn summarize(name: &str, ca: &Float64Chunked) -> ColumnSummary {
    let count = ca.len() - ca.null_count();
    let quantile = |q: f64| ca.quantile(q, QuantileMethod::Linear).ok().flatten();

    ColumnSummary {
        name: name.to_string(),
        count,
        mean: ca.mean(),
        std: if count > 1 { ca.std(1) } else { None },
        min: ca.min(),
        q25: quantile(0.25),
        median: ca.median(),
        q75: quantile(0.75),
        max: ca.max(),
    }
}
