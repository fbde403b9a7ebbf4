//! Core types for DiaScreen

use serde::{Deserialize, Serialize};

/// Number of input features the deployed screening model is trained on
pub const FEATURE_COUNT: usize = 8;

/// One screening intake submitted for prediction.
///
/// Field names on the wire mirror the training-time column names exactly;
/// the serde renames keep the form encoding identical to the training
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    /// Number of pregnancies
    #[serde(rename = "Pregnancies")]
    pub pregnancies: f64,

    /// Plasma glucose concentration
    #[serde(rename = "Glucose")]
    pub glucose: f64,

    /// Diastolic blood pressure (mm Hg)
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: f64,

    /// Triceps skin fold thickness (mm)
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: f64,

    /// 2-hour serum insulin (mu U/ml)
    #[serde(rename = "Insulin")]
    pub insulin: f64,

    /// Body mass index (kg/m^2)
    #[serde(rename = "BMI")]
    pub bmi: f64,

    /// Diabetes pedigree function score
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree_function: f64,

    /// Age in years
    #[serde(rename = "Age")]
    pub age: f64,
}

impl ScreeningRecord {
    /// Emit the fields in the fixed order used at training time.
    ///
    /// This ordering is the one invariant the model depends on; every
    /// inference path goes through it.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age,
        ]
    }
}

/// Discrete outcome of one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Class 0
    Negative,
    /// Class 1
    Positive,
}

impl Verdict {
    /// Map a raw class label to a verdict. Any non-zero label is positive.
    pub fn from_class(class: i64) -> Self {
        if class == 0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// The raw integer class (0 or 1), returned by the JSON endpoint
    pub fn class(&self) -> u8 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    /// The label string returned by the screening form endpoint
    pub fn screening_label(&self) -> &'static str {
        match self {
            Self::Negative => "Negatif Diabetes",
            Self::Positive => "Positif Diabetes",
        }
    }

    /// Stable lowercase name, used for logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Positive => "positive",
        }
    }
}
