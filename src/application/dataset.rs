//! Dataset service: Loads, caches and summarises the diabetes dataset.
//!
//! Loaded datasets are memoised by path, so switching dashboard pages never
//! re-reads the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::DatasetError;
use crate::domain::{ranges, ColumnSummary, DatasetTable, HealthField};
use crate::ports::DatasetSource;
use crate::GlycoscopeError;

/// A loaded dataset and the summary views the dashboard presents.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    source: PathBuf,
    table: DatasetTable,
    loaded_at: DateTime<Utc>,
}

impl DatasetSummary {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, table: DatasetTable) -> Self {
        Self {
            source: source.into(),
            table,
            loaded_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    #[must_use]
    pub fn table(&self) -> &DatasetTable {
        &self.table
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.table.record_count()
    }

    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.table.feature_count()
    }

    /// Percentage of non-missing cells, one decimal.
    #[must_use]
    pub fn data_quality_percent(&self) -> f64 {
        self.table.data_quality_percent()
    }

    #[must_use]
    pub fn preview(&self, rows: usize) -> DatasetTable {
        self.table.preview(rows)
    }

    #[must_use]
    pub fn summary_statistics(&self) -> Vec<ColumnSummary> {
        self.table.describe()
    }

    /// How the values of each measurement column sit against its plausible range.
    ///
    /// Columns without a matching [`HealthField`] (e.g. `Outcome`) are skipped.
    #[must_use]
    pub fn range_compliance(&self) -> Vec<RangeCompliance> {
        self.table
            .columns()
            .iter()
            .filter_map(|column| {
                let field = HealthField::from_column(column)?;
                let range = ranges::range_for(field)?;

                let mut compliance = RangeCompliance {
                    field,
                    present: 0,
                    below: 0,
                    above: 0,
                };
                for value in self.table.column_values(column) {
                    compliance.present += 1;
                    if value < range.min {
                        compliance.below += 1;
                    } else if value > range.max {
                        compliance.above += 1;
                    }
                }
                Some(compliance)
            })
            .collect()
    }
}

/// Range check results for one dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeCompliance {
    pub field: HealthField,
    /// Non-missing values
    pub present: usize,
    pub below: usize,
    pub above: usize,
}

impl RangeCompliance {
    #[must_use]
    pub fn in_range(&self) -> usize {
        self.present - self.below - self.above
    }

    /// Share of present values inside the range, or `None` for an empty column.
    #[must_use]
    pub fn in_range_percent(&self) -> Option<f64> {
        (self.present > 0).then(|| self.in_range() as f64 / self.present as f64 * 100.0)
    }
}

/// Service for loading datasets through a [`DatasetSource`].
pub struct DatasetService<S>
where
    S: DatasetSource,
{
    source: S,
    cache: Mutex<HashMap<PathBuf, Arc<DatasetSummary>>>,
}

impl<S> DatasetService<S>
where
    S: DatasetSource,
    S::Error: Into<DatasetError>,
{
    /// Create a new dataset service.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Open the dataset at `path`, loading it on first use.
    ///
    /// # Errors
    /// Returns error if the dataset cannot be loaded.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Arc<DatasetSummary>, GlycoscopeError> {
        let path = path.as_ref();

        // The cache holds only immutable summaries, so a poisoned lock is still consistent.
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            tracing::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(hit));
        }

        let table = self
            .source
            .load(path)
            .map_err(|e| GlycoscopeError::Dataset(e.into()))?;
        let summary = Arc::new(DatasetSummary::new(path, table));

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = cache
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::clone(&summary));
        Ok(Arc::clone(entry))
    }

    /// Drop any cached copy of `path` and load it again.
    ///
    /// # Errors
    /// Returns error if the dataset cannot be loaded.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<Arc<DatasetSummary>, GlycoscopeError> {
        let path = path.as_ref();
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
        tracing::info!("Reloading dataset {}", path.display());
        self.open(path)
    }

    /// Number of datasets currently cached.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::CsvDatasetSource;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SAMPLE: &str = "\
Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome
6,148,72,35,0,33.6,0.627,50,1
1,85,66,29,,26.6,0.351,31,0
8,183,64,,,23.3,0.672,19,1
";

    /// Wraps the CSV source and counts loads.
    struct CountingSource {
        inner: CsvDatasetSource,
        loads: AtomicUsize,
    }

    impl DatasetSource for CountingSource {
        type Error = DatasetError;

        fn load(&self, path: &Path) -> Result<DatasetTable, DatasetError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(path)
        }
    }

    fn sample_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write");
        file
    }

    fn counting_service() -> DatasetService<CountingSource> {
        DatasetService::new(CountingSource {
            inner: CsvDatasetSource::new(),
            loads: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_summary_views() {
        let file = sample_file();
        let service = DatasetService::new(CsvDatasetSource::new());
        let summary = service.open(file.path()).expect("Should open");

        assert_eq!(summary.record_count(), 3);
        assert_eq!(summary.feature_count(), 9);
        // 24 of 27 cells present
        assert!((summary.data_quality_percent() - 88.9).abs() < 1e-9);
        assert_eq!(summary.preview(2).record_count(), 2);
        assert_eq!(summary.summary_statistics().len(), 9);
        assert_eq!(summary.source(), file.path());
    }

    #[test]
    fn test_open_is_memoised_by_path() {
        let file = sample_file();
        let service = counting_service();

        let first = service.open(file.path()).expect("Should open");
        let second = service.open(file.path()).expect("Should open");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.source.loads.load(Ordering::SeqCst), 1);
        assert_eq!(service.cached_count(), 1);
    }

    #[test]
    fn test_reload_reads_again() {
        let file = sample_file();
        let service = counting_service();

        let first = service.open(file.path()).expect("Should open");
        let reloaded = service.reload(file.path()).expect("Should reload");

        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(service.source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_file_is_not_cached() {
        let dir = tempfile::tempdir().expect("temp dir");
        let service = DatasetService::new(CsvDatasetSource::new());

        let err = service
            .open(dir.path().join("absent.csv"))
            .expect_err("missing file");
        assert!(matches!(err, GlycoscopeError::Dataset(DatasetError::NotFound(_))));
        assert_eq!(service.cached_count(), 0);
    }

    #[test]
    fn test_range_compliance() {
        let file = sample_file();
        let service = DatasetService::new(CsvDatasetSource::new());
        let compliance = service.open(file.path()).expect("Should open").range_compliance();

        // Outcome has no range
        assert_eq!(compliance.len(), 8);

        let insulin = compliance
            .iter()
            .find(|c| c.field == HealthField::Insulin)
            .expect("insulin column");
        assert_eq!(insulin.present, 1);
        assert_eq!(insulin.below, 1);
        assert_eq!(insulin.in_range_percent(), Some(0.0));

        let age = compliance
            .iter()
            .find(|c| c.field == HealthField::Age)
            .expect("age column");
        assert_eq!((age.present, age.below, age.above), (3, 1, 0));
        assert_eq!(age.in_range(), 2);

        let glucose = compliance
            .iter()
            .find(|c| c.field == HealthField::Glucose)
            .expect("glucose column");
        assert_eq!(glucose.in_range_percent(), Some(100.0));
    }
}
