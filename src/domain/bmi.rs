//! Body mass index calculation and WHO weight categories.

use serde::{Deserialize, Serialize};

/// Invalid calculator inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BmiError {
    #[error("Weight must be a finite, positive number of kilograms (got {0})")]
    InvalidWeight(f64),

    #[error("Height must be a finite, positive number of metres (got {0})")]
    InvalidHeight(f64),
}

/// Weight category for a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// 18.5 up to 25
    NormalWeight,
    /// 25 up to 30
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI from weight (kg) and height (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiCalculator {
    weight_kg: f64,
    height_m: f64,
}

impl BmiCalculator {
    /// Create a calculator.
    ///
    /// # Errors
    /// Returns error if either value is not finite or height is not positive.
    pub fn new(weight_kg: f64, height_m: f64) -> Result<Self, BmiError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(BmiError::InvalidWeight(weight_kg));
        }
        if !height_m.is_finite() || height_m <= 0.0 {
            return Err(BmiError::InvalidHeight(height_m));
        }
        Ok(Self { weight_kg, height_m })
    }

    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    #[must_use]
    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    /// weight / height²
    #[must_use]
    pub fn calculate_bmi(&self) -> f64 {
        self.weight_kg / self.height_m.powi(2)
    }

    #[must_use]
    pub fn category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.calculate_bmi())
    }
}
