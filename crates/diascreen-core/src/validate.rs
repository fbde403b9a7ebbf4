//! Range validation for screening intake fields.
//!
//! Only two fields carry range constraints: the diabetes pedigree function
//! and BMI. The remaining six fields are accepted as-is once the transport
//! layer has established they are present and numeric. The JSON array
//! entry point bypasses this validator entirely; the asymmetry is tied to
//! the two entry shapes and is deliberate.

use crate::error::ValidationError;
use crate::types::{ScreeningRecord, FEATURE_COUNT};

/// Inclusive bounds for the diabetes pedigree function score
pub const PEDIGREE_RANGE: (f64, f64) = (0.0, 2.0);

/// Inclusive bounds for body mass index
pub const BMI_RANGE: (f64, f64) = (10.0, 50.0);

/// A screening record that has passed range validation.
///
/// Only [`validate`] constructs this type, so holding one is proof the
/// range checks ran on the row it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFeatures {
    row: [f64; FEATURE_COUNT],
}

impl ValidatedFeatures {
    /// The feature row in training order
    pub fn row(&self) -> &[f64] {
        &self.row
    }
}

/// Check the two constrained fields of a screening record.
///
/// The pedigree function is checked before BMI; when both are out of range
/// the pedigree error is the one reported. NaN fails both containment
/// checks and is rejected like any other out-of-range value.
pub fn validate(record: &ScreeningRecord) -> Result<ValidatedFeatures, ValidationError> {
    let (lo, hi) = PEDIGREE_RANGE;
    if !(lo..=hi).contains(&record.diabetes_pedigree_function) {
        return Err(ValidationError::new(
            "DiabetesPedigreeFunction",
            format!("Diabetes Pedigree Function harus bernilai antara {} dan {}", lo, hi),
        ));
    }

    let (lo, hi) = BMI_RANGE;
    if !(lo..=hi).contains(&record.bmi) {
        return Err(ValidationError::new(
            "BMI",
            format!("BMI harus bernilai antara {} dan {}", lo, hi),
        ));
    }

    Ok(ValidatedFeatures {
        row: record.to_row(),
    })
}
