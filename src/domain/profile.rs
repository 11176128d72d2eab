//! Health profile: a validated bundle of one subject's measurements.
//!
//! Range validation runs once, when the profile is built. Out-of-range
//! values are recorded as messages rather than rejected; only values that
//! are not usable numbers fail construction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ranges::{range_for, HealthField};

/// Dictionary form of a profile (`to_dict` / `from_dict`).
pub type ProfileDict = Map<String, Value>;

/// Width of the `=` rule framing the text summary.
const SUMMARY_RULE_WIDTH: usize = 40;

/// Hard construction failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be a finite number")]
    NonFinite { field: HealthField },

    #[error("{field} must be a number")]
    NotNumeric { field: HealthField },

    #[error("{field} must be a whole number, got {value}")]
    NotInteger { field: HealthField, value: f64 },
}

/// The four always-required measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreFeatures {
    pub glucose: f64,
    pub blood_pressure: f64,
    pub bmi: f64,
    pub age: i64,
}

/// Immutable, validated health profile.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthProfile {
    glucose: f64,
    blood_pressure: f64,
    bmi: f64,
    age: i64,
    skin_thickness: Option<f64>,
    insulin: Option<f64>,
    pregnancies: i64,
    diabetes_pedigree: Option<f64>,
    errors: Vec<String>,
}

/// Builder for [`HealthProfile`]. Required fields are taken up front.
#[derive(Debug, Clone)]
pub struct HealthProfileBuilder {
    glucose: f64,
    blood_pressure: f64,
    bmi: f64,
    age: i64,
    skin_thickness: Option<f64>,
    insulin: Option<f64>,
    pregnancies: i64,
    diabetes_pedigree: Option<f64>,
}

impl HealthProfileBuilder {
    #[must_use]
    pub fn skin_thickness(mut self, value: f64) -> Self {
        self.skin_thickness = Some(value);
        self
    }

    #[must_use]
    pub fn insulin(mut self, value: f64) -> Self {
        self.insulin = Some(value);
        self
    }

    #[must_use]
    pub fn pregnancies(mut self, value: i64) -> Self {
        self.pregnancies = value;
        self
    }

    #[must_use]
    pub fn diabetes_pedigree(mut self, value: f64) -> Self {
        self.diabetes_pedigree = Some(value);
        self
    }

    /// Finish the profile and run range validation.
    ///
    /// # Errors
    /// Returns [`ProfileError::NonFinite`] if any supplied float is NaN or infinite.
    pub fn build(self) -> Result<HealthProfile, ProfileError> {
        let floats = [
            (HealthField::Glucose, Some(self.glucose)),
            (HealthField::BloodPressure, Some(self.blood_pressure)),
            (HealthField::Bmi, Some(self.bmi)),
            (HealthField::SkinThickness, self.skin_thickness),
            (HealthField::Insulin, self.insulin),
            (HealthField::DiabetesPedigree, self.diabetes_pedigree),
        ];
        for (field, value) in floats {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ProfileError::NonFinite { field });
            }
        }

        let mut profile = HealthProfile {
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            bmi: self.bmi,
            age: self.age,
            skin_thickness: self.skin_thickness,
            insulin: self.insulin,
            pregnancies: self.pregnancies,
            diabetes_pedigree: self.diabetes_pedigree,
            errors: Vec::new(),
        };
        profile.errors = profile.validate();
        Ok(profile)
    }
}

impl HealthProfile {
    /// Start a profile from the required measurements.
    #[must_use]
    pub fn builder(glucose: f64, blood_pressure: f64, bmi: f64, age: i64) -> HealthProfileBuilder {
        HealthProfileBuilder {
            glucose,
            blood_pressure,
            bmi,
            age,
            skin_thickness: None,
            insulin: None,
            pregnancies: 0,
            diabetes_pedigree: None,
        }
    }

    /// Rebuild a profile from its dictionary form.
    ///
    /// Reconstruction is lenient: a missing required key reads as 0 and the
    /// result is validated like any other profile, so it will usually carry
    /// range errors. Missing or `null` optional keys are absent.
    ///
    /// # Errors
    /// Returns an error if a present value is not a number, or if `age` or
    /// `pregnancies` is not a whole number.
    pub fn from_dict(data: &ProfileDict) -> Result<Self, ProfileError> {
        let builder = HealthProfileBuilder {
            glucose: required_float(data, HealthField::Glucose)?,
            blood_pressure: required_float(data, HealthField::BloodPressure)?,
            bmi: required_float(data, HealthField::Bmi)?,
            age: required_int(data, HealthField::Age)?,
            skin_thickness: optional_float(data, HealthField::SkinThickness)?,
            insulin: optional_float(data, HealthField::Insulin)?,
            pregnancies: match present(data, HealthField::Pregnancies) {
                Some(value) => integer(HealthField::Pregnancies, value)?,
                None => 0,
            },
            diabetes_pedigree: optional_float(data, HealthField::DiabetesPedigree)?,
        };
        builder.build()
    }

    /// Measurements that take part in validation, in check order.
    fn checked_values(&self) -> Vec<(HealthField, f64)> {
        let mut values = vec![
            (HealthField::Glucose, self.glucose),
            (HealthField::BloodPressure, self.blood_pressure),
            (HealthField::Bmi, self.bmi),
            (HealthField::Age, self.age as f64),
        ];
        if let Some(v) = self.skin_thickness {
            values.push((HealthField::SkinThickness, v));
        }
        if let Some(v) = self.insulin {
            values.push((HealthField::Insulin, v));
        }
        // Zero pregnancies is always accepted, independent of the table minimum.
        if self.pregnancies != 0 {
            values.push((HealthField::Pregnancies, self.pregnancies as f64));
        }
        if let Some(v) = self.diabetes_pedigree {
            values.push((HealthField::DiabetesPedigree, v));
        }
        values
    }

    fn validate(&self) -> Vec<String> {
        self.checked_values()
            .into_iter()
            .filter_map(|(field, value)| range_message(field, value))
            .collect()
    }

    #[must_use]
    pub fn glucose(&self) -> f64 {
        self.glucose
    }

    #[must_use]
    pub fn blood_pressure(&self) -> f64 {
        self.blood_pressure
    }

    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    #[must_use]
    pub fn age(&self) -> i64 {
        self.age
    }

    #[must_use]
    pub fn skin_thickness(&self) -> Option<f64> {
        self.skin_thickness
    }

    #[must_use]
    pub fn insulin(&self) -> Option<f64> {
        self.insulin
    }

    #[must_use]
    pub fn pregnancies(&self) -> i64 {
        self.pregnancies
    }

    #[must_use]
    pub fn diabetes_pedigree(&self) -> Option<f64> {
        self.diabetes_pedigree
    }

    /// True when every checked measurement is inside its plausible range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validation messages, in check order.
    #[must_use]
    pub fn validation_errors(&self) -> &[String] {
        &self.errors
    }

    /// Dictionary form. Validation state is not included.
    #[must_use]
    pub fn to_dict(&self) -> ProfileDict {
        let mut dict = ProfileDict::new();
        dict.insert(HealthField::Glucose.key().into(), Value::from(self.glucose));
        dict.insert(HealthField::BloodPressure.key().into(), Value::from(self.blood_pressure));
        dict.insert(HealthField::Bmi.key().into(), Value::from(self.bmi));
        dict.insert(HealthField::Age.key().into(), Value::from(self.age));
        dict.insert(HealthField::Pregnancies.key().into(), Value::from(self.pregnancies));

        let optionals = [
            (HealthField::SkinThickness, self.skin_thickness),
            (HealthField::Insulin, self.insulin),
            (HealthField::DiabetesPedigree, self.diabetes_pedigree),
        ];
        for (field, value) in optionals {
            if let Some(v) = value {
                dict.insert(field.key().into(), Value::from(v));
            }
        }
        dict
    }

    #[must_use]
    pub fn core_features(&self) -> CoreFeatures {
        CoreFeatures {
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            bmi: self.bmi,
            age: self.age,
        }
    }

    /// Fields carrying a value: the five always-present ones, then any
    /// supplied optionals.
    #[must_use]
    pub fn available_features(&self) -> Vec<HealthField> {
        let mut fields = vec![
            HealthField::Glucose,
            HealthField::BloodPressure,
            HealthField::Bmi,
            HealthField::Age,
            HealthField::Pregnancies,
        ];
        if self.skin_thickness.is_some() {
            fields.push(HealthField::SkinThickness);
        }
        if self.insulin.is_some() {
            fields.push(HealthField::Insulin);
        }
        if self.diabetes_pedigree.is_some() {
            fields.push(HealthField::DiabetesPedigree);
        }
        fields
    }

    /// Multi-line, human-readable rendering of the profile.
    #[must_use]
    pub fn summary(&self) -> String {
        let rule = "=".repeat(SUMMARY_RULE_WIDTH);

        let mut lines = vec![
            "Health Profile Summary".to_string(),
            rule.clone(),
            format!("Age: {} years", self.age),
            format!("BMI: {:.1}", self.bmi),
            format!("Glucose: {:.0} mg/dL", self.glucose),
            format!("Blood Pressure: {:.0} mm Hg", self.blood_pressure),
            format!("Pregnancies: {}", self.pregnancies),
        ];
        if let Some(v) = self.skin_thickness {
            lines.push(format!("Skin Thickness: {v:.1} mm"));
        }
        if let Some(v) = self.insulin {
            lines.push(format!("Insulin: {v:.0} mu U/ml"));
        }
        if let Some(v) = self.diabetes_pedigree {
            lines.push(format!("Diabetes Pedigree: {v:.3}"));
        }
        lines.push(rule);

        if self.is_valid() {
            lines.push("✓ All values within expected ranges".to_string());
        } else {
            lines.push(format!("⚠ {} validation error(s)", self.errors.len()));
        }

        lines.join("\n")
    }
}

impl std::fmt::Display for HealthProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

fn range_message(field: HealthField, value: f64) -> Option<String> {
    let range = range_for(field)?;
    if value < range.min {
        Some(format!(
            "{} ({}) is below minimum expected value ({})",
            field.label(),
            value,
            range.min
        ))
    } else if value > range.max {
        Some(format!(
            "{} ({}) is above maximum expected value ({})",
            field.label(),
            value,
            range.max
        ))
    } else {
        None
    }
}

/// Value for `field`, treating an explicit `null` as absent.
fn present(data: &ProfileDict, field: HealthField) -> Option<&Value> {
    data.get(field.key()).filter(|v| !v.is_null())
}

fn number(field: HealthField, value: &Value) -> Result<f64, ProfileError> {
    value.as_f64().ok_or(ProfileError::NotNumeric { field })
}

fn integer(field: HealthField, value: &Value) -> Result<i64, ProfileError> {
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    let v = number(field, value)?;
    whole_i64(v).ok_or(ProfileError::NotInteger { field, value: v })
}

/// `v` as an `i64` when it is whole and inside the `i64` range.
pub(crate) fn whole_i64(v: f64) -> Option<i64> {
    (v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
}

// Required keys default to 0 when missing; an explicit null is still a type error.
fn required_float(data: &ProfileDict, field: HealthField) -> Result<f64, ProfileError> {
    data.get(field.key()).map_or(Ok(0.0), |v| number(field, v))
}

fn required_int(data: &ProfileDict, field: HealthField) -> Result<i64, ProfileError> {
    data.get(field.key()).map_or(Ok(0), |v| integer(field, v))
}

fn optional_float(data: &ProfileDict, field: HealthField) -> Result<Option<f64>, ProfileError> {
    present(data, field).map(|v| number(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict(value: Value) -> ProfileDict {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn typical() -> HealthProfile {
        HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .build()
            .expect("Should build")
    }

    #[test]
    fn test_typical_profile_is_valid() {
        let profile = typical();
        assert!(profile.is_valid());
        assert!(profile.validation_errors().is_empty());
    }

    #[test]
    fn test_out_of_range_required_fields() {
        let profile = HealthProfile::builder(500.0, 10.0, 28.5, 45)
            .build()
            .expect("Should build");

        assert!(!profile.is_valid());
        assert_eq!(
            profile.validation_errors(),
            [
                "Glucose (500) is above maximum expected value (199)",
                "Blood Pressure (10) is below minimum expected value (24)",
            ]
        );
    }

    #[test]
    fn test_supplied_zero_insulin_is_flagged() {
        let profile = HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .insulin(0.0)
            .build()
            .expect("Should build");

        assert_eq!(
            profile.validation_errors(),
            ["Insulin (0) is below minimum expected value (14)"]
        );
    }

    #[test]
    fn test_bounds_inclusive_and_fractional_values() {
        let at_bounds = HealthProfile::builder(44.0, 122.0, 18.2, 81)
            .diabetes_pedigree(0.078)
            .build()
            .expect("Should build");
        assert!(at_bounds.is_valid());

        let low_bmi = HealthProfile::builder(120.0, 80.0, 18.1, 45)
            .diabetes_pedigree(2.5)
            .build()
            .expect("Should build");
        assert_eq!(
            low_bmi.validation_errors(),
            [
                "Bmi (18.1) is below minimum expected value (18.2)",
                "Diabetes Pedigree (2.5) is above maximum expected value (2.42)",
            ]
        );
    }

    #[test]
    fn test_each_field_reports_once_in_check_order() {
        let profile = HealthProfile::builder(10.0, 200.0, 70.0, 18)
            .skin_thickness(100.0)
            .insulin(900.0)
            .pregnancies(25)
            .diabetes_pedigree(0.01)
            .build()
            .expect("Should build");

        let errors = profile.validation_errors();
        assert_eq!(errors.len(), 8);
        let prefixes = [
            "Glucose",
            "Blood Pressure",
            "Bmi",
            "Age",
            "Skin Thickness",
            "Insulin",
            "Pregnancies",
            "Diabetes Pedigree",
        ];
        for (message, prefix) in errors.iter().zip(prefixes) {
            assert!(message.starts_with(prefix), "{message} should start with {prefix}");
        }
        assert!(errors[0].contains("below minimum expected value (44)"));
        assert!(errors[1].contains("above maximum expected value (122)"));
    }

    #[test]
    fn test_every_field_below_and_above() {
        for field in HealthField::ALL {
            let range = range_for(field).expect("range");
            for (value, phrase) in [
                (range.min - 1.0, format!("below minimum expected value ({})", range.min)),
                (range.max + 1.0, format!("above maximum expected value ({})", range.max)),
            ] {
                let mut data = typical().to_dict();
                let json_value = if field.is_integer() {
                    Value::from(value as i64)
                } else {
                    Value::from(value)
                };
                data.insert(field.key().into(), json_value);

                let profile = HealthProfile::from_dict(&data).expect("Should build");
                let hits: Vec<_> = profile
                    .validation_errors()
                    .iter()
                    .filter(|m| m.starts_with(field.label()))
                    .collect();
                assert_eq!(hits.len(), 1, "{field} at {value}");
                assert!(hits[0].contains(&phrase), "{} missing {phrase}", hits[0]);
            }
        }
    }

    #[test]
    fn test_zero_pregnancies_never_flagged() {
        let profile = HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .pregnancies(0)
            .build()
            .expect("Should build");
        assert!(profile
            .validation_errors()
            .iter()
            .all(|m| !m.starts_with("Pregnancies")));
        assert_eq!(profile.pregnancies(), 0);
    }

    #[test]
    fn test_absent_optionals_are_not_checked() {
        let profile = typical();
        assert_eq!(profile.skin_thickness(), None);
        assert_eq!(profile.insulin(), None);
        assert_eq!(profile.diabetes_pedigree(), None);
        assert!(profile.is_valid());
    }

    #[test]
    fn test_non_finite_values_fail_construction() {
        let err = HealthProfile::builder(f64::NAN, 80.0, 28.5, 45)
            .build()
            .expect_err("NaN glucose must fail");
        assert_eq!(err, ProfileError::NonFinite { field: HealthField::Glucose });

        let err = HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .insulin(f64::INFINITY)
            .build()
            .expect_err("infinite insulin must fail");
        assert_eq!(err, ProfileError::NonFinite { field: HealthField::Insulin });
    }

    #[test]
    fn test_to_dict_keys() {
        let basic = typical().to_dict();
        let mut keys: Vec<_> = basic.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["age", "blood_pressure", "bmi", "glucose", "pregnancies"]);
        assert_eq!(basic["age"], json!(45));
        assert_eq!(basic["pregnancies"], json!(0));

        let full = HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .skin_thickness(20.0)
            .insulin(85.0)
            .diabetes_pedigree(0.627)
            .build()
            .expect("Should build")
            .to_dict();
        assert_eq!(full.len(), 8);
        assert_eq!(full["diabetes_pedigree"], json!(0.627));
        assert!(!full.contains_key("errors"));
    }

    #[test]
    fn test_dict_round_trip() {
        let original = HealthProfile::builder(148.0, 72.0, 33.6, 50)
            .skin_thickness(35.0)
            .pregnancies(6)
            .diabetes_pedigree(0.627)
            .build()
            .expect("Should build");

        let restored = HealthProfile::from_dict(&original.to_dict()).expect("Should rebuild");
        assert_eq!(restored, original);
        assert_eq!(restored.is_valid(), original.is_valid());
    }

    #[test]
    fn test_from_dict_defaults_missing_required_to_zero() {
        let profile = HealthProfile::from_dict(&ProfileDict::new()).expect("Should build");
        assert_eq!(profile.glucose(), 0.0);
        assert_eq!(profile.age(), 0);
        assert_eq!(profile.pregnancies(), 0);
        assert_eq!(profile.validation_errors().len(), 4);
        assert!(!profile.is_valid());
    }

    #[test]
    fn test_from_dict_null_optional_is_absent() {
        let data = dict(json!({
            "glucose": 120, "blood_pressure": 80, "bmi": 28.5, "age": 45,
            "insulin": null, "pregnancies": null
        }));
        let profile = HealthProfile::from_dict(&data).expect("Should build");
        assert_eq!(profile.insulin(), None);
        assert_eq!(profile.pregnancies(), 0);
        assert_eq!(profile.available_features().len(), 5);
    }

    #[test]
    fn test_from_dict_rejects_non_numeric() {
        let data = dict(json!({ "glucose": "high", "blood_pressure": 80, "bmi": 28.5, "age": 45 }));
        assert_eq!(
            HealthProfile::from_dict(&data),
            Err(ProfileError::NotNumeric { field: HealthField::Glucose })
        );

        let data = dict(json!({ "glucose": null, "blood_pressure": 80, "bmi": 28.5, "age": 45 }));
        assert!(HealthProfile::from_dict(&data).is_err());

        let data = dict(json!({ "glucose": 120, "blood_pressure": 80, "bmi": 28.5, "age": 45.5 }));
        assert_eq!(
            HealthProfile::from_dict(&data),
            Err(ProfileError::NotInteger { field: HealthField::Age, value: 45.5 })
        );
    }

    #[test]
    fn test_from_dict_accepts_whole_floats_for_integers() {
        let data = dict(json!({ "glucose": 120, "blood_pressure": 80, "bmi": 28.5, "age": 45.0, "pregnancies": 2.0 }));
        let profile = HealthProfile::from_dict(&data).expect("Should build");
        assert_eq!(profile.age(), 45);
        assert_eq!(profile.pregnancies(), 2);
    }

    #[test]
    fn test_core_and_available_features() {
        let profile = HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .insulin(85.0)
            .diabetes_pedigree(0.5)
            .build()
            .expect("Should build");

        let core = profile.core_features();
        assert_eq!(core.age, 45);
        assert!((core.bmi - 28.5).abs() < f64::EPSILON);
        assert_eq!(
            serde_json::to_value(core).expect("serialize"),
            json!({ "glucose": 120.0, "blood_pressure": 80.0, "bmi": 28.5, "age": 45 })
        );

        assert_eq!(
            profile.available_features(),
            [
                HealthField::Glucose,
                HealthField::BloodPressure,
                HealthField::Bmi,
                HealthField::Age,
                HealthField::Pregnancies,
                HealthField::Insulin,
                HealthField::DiabetesPedigree,
            ]
        );
    }

    #[test]
    fn test_summary_valid_profile() {
        let profile = HealthProfile::builder(120.0, 80.0, 28.5, 45)
            .skin_thickness(20.0)
            .insulin(85.0)
            .pregnancies(2)
            .diabetes_pedigree(0.627)
            .build()
            .expect("Should build");

        let rule = "=".repeat(40);
        let expected = [
            "Health Profile Summary",
            rule.as_str(),
            "Age: 45 years",
            "BMI: 28.5",
            "Glucose: 120 mg/dL",
            "Blood Pressure: 80 mm Hg",
            "Pregnancies: 2",
            "Skin Thickness: 20.0 mm",
            "Insulin: 85 mu U/ml",
            "Diabetes Pedigree: 0.627",
            rule.as_str(),
            "✓ All values within expected ranges",
        ]
        .join("\n");
        assert_eq!(profile.summary(), expected);
        assert_eq!(profile.to_string(), expected);
    }

    #[test]
    fn test_summary_reports_error_count() {
        let profile = HealthProfile::builder(500.0, 10.0, 28.5, 45)
            .build()
            .expect("Should build");
        let summary = profile.summary();
        assert!(summary.ends_with("⚠ 2 validation error(s)"));
        assert!(!summary.contains("Insulin"));
        assert_eq!(summary.lines().count(), 9);
    }
}
