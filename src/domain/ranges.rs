//! Plausible measurement ranges for the Pima diabetes features.
//!
//! Bounds come from the cleaned dataset (observed min/max after removing
//! physiologically impossible zeros), not from clinical reference limits.

use serde::{Deserialize, Serialize};

/// A health measurement known to the validation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthField {
    /// Number of pregnancies
    Pregnancies,
    /// Plasma glucose, 2 hours into an oral glucose tolerance test (mg/dL)
    Glucose,
    /// Diastolic blood pressure (mm Hg)
    BloodPressure,
    /// Triceps skin fold thickness (mm)
    SkinThickness,
    /// 2-hour serum insulin (mu U/ml)
    Insulin,
    /// Body mass index (kg/m²)
    Bmi,
    /// Diabetes pedigree function
    DiabetesPedigree,
    /// Age in years
    Age,
}

impl HealthField {
    /// All fields, in dataset column order.
    pub const ALL: [HealthField; 8] = [
        Self::Pregnancies,
        Self::Glucose,
        Self::BloodPressure,
        Self::SkinThickness,
        Self::Insulin,
        Self::Bmi,
        Self::DiabetesPedigree,
        Self::Age,
    ];

    /// Dictionary key (snake_case).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Pregnancies => "pregnancies",
            Self::Glucose => "glucose",
            Self::BloodPressure => "blood_pressure",
            Self::SkinThickness => "skin_thickness",
            Self::Insulin => "insulin",
            Self::Bmi => "bmi",
            Self::DiabetesPedigree => "diabetes_pedigree",
            Self::Age => "age",
        }
    }

    /// Title-cased label used in validation messages.
    ///
    /// Derived from the key word by word, so `bmi` becomes `Bmi`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pregnancies => "Pregnancies",
            Self::Glucose => "Glucose",
            Self::BloodPressure => "Blood Pressure",
            Self::SkinThickness => "Skin Thickness",
            Self::Insulin => "Insulin",
            Self::Bmi => "Bmi",
            Self::DiabetesPedigree => "Diabetes Pedigree",
            Self::Age => "Age",
        }
    }

    /// Column header used by the dataset CSV.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Pregnancies => "Pregnancies",
            Self::Glucose => "Glucose",
            Self::BloodPressure => "BloodPressure",
            Self::SkinThickness => "SkinThickness",
            Self::Insulin => "Insulin",
            Self::Bmi => "BMI",
            Self::DiabetesPedigree => "DiabetesPedigreeFunction",
            Self::Age => "Age",
        }
    }

    /// Whether the field holds whole numbers.
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Pregnancies | Self::Age)
    }

    /// Look up a field by its dictionary key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Look up a field by its CSV column header.
    #[must_use]
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }
}

impl std::fmt::Display for HealthField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Inclusive plausible range for a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

impl ValidRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The range table: one entry per field with a known plausible range.
pub const VALID_RANGES: [(HealthField, ValidRange); 8] = [
    // 0 is plausible (no pregnancies)
    (HealthField::Pregnancies, ValidRange::new(0.0, 20.0)),
    (HealthField::Glucose, ValidRange::new(44.0, 199.0)),
    (HealthField::BloodPressure, ValidRange::new(24.0, 122.0)),
    (HealthField::SkinThickness, ValidRange::new(7.0, 99.0)),
    (HealthField::Insulin, ValidRange::new(14.0, 846.0)),
    (HealthField::Bmi, ValidRange::new(18.2, 67.1)),
    (HealthField::DiabetesPedigree, ValidRange::new(0.078, 2.42)),
    // the dataset only covers women aged 21+
    (HealthField::Age, ValidRange::new(21.0, 81.0)),
];

/// Plausible range for a field, if the table defines one.
#[must_use]
pub fn range_for(field: HealthField) -> Option<ValidRange> {
    VALID_RANGES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, range)| *range)
}

/// Plausible range for a field given by name.
///
/// Returns `None` when the name is not a known measurement.
#[must_use]
pub fn valid_range(name: &str) -> Option<ValidRange> {
    HealthField::from_key(name).and_then(range_for)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_range() {
        for field in HealthField::ALL {
            assert!(range_for(field).is_some(), "missing range for {field}");
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let bmi = valid_range("bmi").expect("bmi range");
        assert!((bmi.min - 18.2).abs() < f64::EPSILON);
        assert!((bmi.max - 67.1).abs() < f64::EPSILON);

        let pedigree = valid_range("diabetes_pedigree").expect("pedigree range");
        assert!((pedigree.min - 0.078).abs() < f64::EPSILON);

        assert!(valid_range("cholesterol").is_none());
        assert!(valid_range("Glucose").is_none());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let glucose = valid_range("glucose").expect("glucose range");
        assert!(glucose.contains(44.0));
        assert!(glucose.contains(199.0));
        assert!(!glucose.contains(43.9));
        assert!(!glucose.contains(199.1));
    }

    #[test]
    fn test_key_and_column_mapping() {
        assert_eq!(HealthField::from_key("blood_pressure"), Some(HealthField::BloodPressure));
        assert_eq!(
            HealthField::from_column("DiabetesPedigreeFunction"),
            Some(HealthField::DiabetesPedigree)
        );
        assert_eq!(HealthField::from_column("Outcome"), None);
        assert_eq!(HealthField::Bmi.label(), "Bmi");
        assert_eq!(HealthField::SkinThickness.label(), "Skin Thickness");
    }
}
