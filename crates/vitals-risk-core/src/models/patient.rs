//! Patient input models.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted age range in years.
pub const AGE_RANGE: RangeInclusive<u32> = 1..=120;
/// Accepted height range in centimetres.
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 50.0..=250.0;
/// Accepted weight range in kilograms.
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 1.0..=300.0;
/// Accepted systolic pressure range in mmHg.
pub const SYSTOLIC_RANGE: RangeInclusive<u32> = 60..=300;
/// Accepted diastolic pressure range in mmHg.
pub const DIASTOLIC_RANGE: RangeInclusive<u32> = 40..=200;
/// Accepted fasting blood sugar range in mg/dL.
pub const BLOOD_SUGAR_RANGE: RangeInclusive<f64> = 40.0..=500.0;
/// Accepted total cholesterol range in mg/dL.
pub const CHOLESTEROL_RANGE: RangeInclusive<f64> = 50.0..=400.0;

/// Patient record validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Age {0} is outside the accepted range 1-120")]
    AgeOutOfRange(u32),

    #[error("{field} must be a finite positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} value {value} is outside the accepted range {min}-{max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Self-reported gender. Collected but not used by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Blood pressure reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

impl BloodPressure {
    pub fn new(systolic: u32, diastolic: u32) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

/// A single patient record submitted for risk evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientData {
    /// Caller-side identifier, echoed back in assessments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    #[serde(default)]
    pub blood_pressure: Option<BloodPressure>,
    /// Fasting blood sugar (mg/dL)
    #[serde(default)]
    pub blood_sugar: Option<f64>,
    /// Total cholesterol (mg/dL)
    #[serde(default)]
    pub cholesterol: Option<f64>,
    #[serde(default)]
    pub smoking: Option<bool>,
    #[serde(default)]
    pub diabetic: Option<bool>,
    /// Disease ids present in the patient's family history
    #[serde(default)]
    pub family_history: Option<BTreeSet<String>>,
    /// Free-text symptoms. Not scored.
    #[serde(default)]
    pub symptoms: Option<BTreeSet<String>>,
}

impl PatientData {
    /// Create a record with the required fields; every optional field is unset.
    pub fn new(age: u32, gender: Gender, height: f64, weight: f64) -> Self {
        Self {
            id: None,
            name: None,
            age,
            gender,
            height,
            weight,
            blood_pressure: None,
            blood_sugar: None,
            cholesterol: None,
            smoking: None,
            diabetic: None,
            family_history: None,
            symptoms: None,
        }
    }

    /// Body-mass index, weight(kg) / height(m)².
    ///
    /// Returns `None` when either height or weight is not a finite positive
    /// number, so callers skip the factor rather than divide by zero.
    pub fn bmi(&self) -> Option<f64> {
        if !is_positive(self.height) || !is_positive(self.weight) {
            return None;
        }
        let height_m = self.height / 100.0;
        Some(self.weight / (height_m * height_m))
    }

    /// Whether the family history names the given disease id.
    ///
    /// `None` when no family history was supplied at all.
    pub fn has_family_history_of(&self, disease_id: &str) -> Option<bool> {
        self.family_history
            .as_ref()
            .map(|history| history.contains(disease_id))
    }

    /// Check every supplied value against the accepted clinical ranges.
    pub fn validate(&self) -> ValidationResult<()> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(ValidationError::AgeOutOfRange(self.age));
        }

        check_range("height", self.height, &HEIGHT_RANGE_CM)?;
        check_range("weight", self.weight, &WEIGHT_RANGE_KG)?;

        if let Some(bp) = self.blood_pressure {
            check_range("systolic", bp.systolic.into(), &widen(&SYSTOLIC_RANGE))?;
            check_range("diastolic", bp.diastolic.into(), &widen(&DIASTOLIC_RANGE))?;
        }
        if let Some(sugar) = self.blood_sugar {
            check_range("bloodSugar", sugar, &BLOOD_SUGAR_RANGE)?;
        }
        if let Some(cholesterol) = self.cholesterol {
            check_range("cholesterol", cholesterol, &CHOLESTEROL_RANGE)?;
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn widen(range: &RangeInclusive<u32>) -> RangeInclusive<f64> {
    f64::from(*range.start())..=f64::from(*range.end())
}

fn check_range(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> ValidationResult<()> {
    if !is_positive(value) {
        return Err(ValidationError::NonPositive { field, value });
    }
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_patient() -> PatientData {
        PatientData::new(45, Gender::Female, 170.0, 70.0)
    }

    #[test]
    fn test_new_patient_has_no_optional_fields() {
        let patient = make_patient();
        assert_eq!(patient.age, 45);
        assert!(patient.blood_pressure.is_none());
        assert!(patient.family_history.is_none());
        assert!(patient.smoking.is_none());
    }

    #[test]
    fn test_bmi_derivation() {
        let bmi = make_patient().bmi().unwrap();
        assert!((bmi - 24.22).abs() < 0.01);
    }

    #[test]
    fn test_bmi_rejects_zero_height() {
        let mut patient = make_patient();
        patient.height = 0.0;
        assert_eq!(patient.bmi(), None);

        patient.height = 170.0;
        patient.weight = -3.0;
        assert_eq!(patient.bmi(), None);

        patient.weight = f64::NAN;
        assert_eq!(patient.bmi(), None);
    }

    #[test]
    fn test_family_history_lookup() {
        let mut patient = make_patient();
        assert_eq!(patient.has_family_history_of("diabetes"), None);

        patient.family_history = Some(["diabetes".to_string()].into_iter().collect());
        assert_eq!(patient.has_family_history_of("diabetes"), Some(true));
        assert_eq!(patient.has_family_history_of("coronary"), Some(false));
    }

    #[test]
    fn test_validate_accepts_plausible_record() {
        let mut patient = make_patient();
        patient.blood_pressure = Some(BloodPressure::new(120, 80));
        patient.blood_sugar = Some(95.0);
        patient.cholesterol = Some(180.0);
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_age() {
        let mut patient = make_patient();
        patient.age = 0;
        assert_eq!(patient.validate(), Err(ValidationError::AgeOutOfRange(0)));

        patient.age = 121;
        assert_eq!(patient.validate(), Err(ValidationError::AgeOutOfRange(121)));
    }

    #[test]
    fn test_validate_rejects_non_positive_height() {
        let mut patient = make_patient();
        patient.height = 0.0;
        assert!(matches!(
            patient.validate(),
            Err(ValidationError::NonPositive { field: "height", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_pressure() {
        let mut patient = make_patient();
        patient.blood_pressure = Some(BloodPressure::new(350, 80));
        assert!(matches!(
            patient.validate(),
            Err(ValidationError::OutOfRange { field: "systolic", .. })
        ));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "age": 65,
            "gender": "male",
            "height": 180,
            "weight": 90,
            "bloodPressure": {"systolic": 150, "diastolic": 95},
            "bloodSugar": 200,
            "familyHistory": ["diabetes", "coronary"]
        }"#;
        let patient: PatientData = serde_json::from_str(json).unwrap();

        assert_eq!(patient.gender, Gender::Male);
        assert_eq!(patient.blood_pressure, Some(BloodPressure::new(150, 95)));
        assert_eq!(patient.blood_sugar, Some(200.0));
        assert_eq!(patient.has_family_history_of("coronary"), Some(true));
        assert_eq!(patient.cholesterol, None);
    }
}
