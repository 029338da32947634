//! Per-factor score transforms.
//!
//! Each factor maps an observed patient value to a score in [0, 1]. The
//! mapping can differ by disease, so transforms are looked up by
//! `(factor, disease id)` first and fall back to a per-factor default.

use std::collections::HashMap;

use crate::config::FlagPolicy;
use crate::models::{BloodPressure, Factor, PatientData};

/// A patient value as seen by a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorValue {
    Scalar(f64),
    Pressure(BloodPressure),
    Flag(bool),
}

impl FactorValue {
    /// Extract the value a factor needs from a patient record.
    ///
    /// `None` means the record does not supply it and the factor is skipped.
    pub fn observe(
        factor: Factor,
        patient: &PatientData,
        disease_id: &str,
        policy: FlagPolicy,
    ) -> Option<Self> {
        match factor {
            Factor::Age => Some(Self::Scalar(f64::from(patient.age))),
            Factor::BloodSugar => patient.blood_sugar.map(Self::Scalar),
            Factor::BloodPressure => patient.blood_pressure.map(Self::Pressure),
            Factor::Cholesterol => patient.cholesterol.map(Self::Scalar),
            Factor::Bmi => patient.bmi().map(Self::Scalar),
            Factor::Smoking => policy.observe(patient.smoking).map(Self::Flag),
            Factor::FamilyHistory => patient.has_family_history_of(disease_id).map(Self::Flag),
            Factor::Diabetes => policy.observe(patient.diabetic).map(Self::Flag),
        }
    }
}

/// Step function over ascending, exclusive upper bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchedule {
    /// (upper bound, score) pairs in ascending bound order
    bands: Vec<(f64, f64)>,
    /// Score at or above the last bound
    otherwise: f64,
}

impl StepSchedule {
    pub fn new(bands: &[(f64, f64)], otherwise: f64) -> Self {
        Self {
            bands: bands.to_vec(),
            otherwise,
        }
    }

    /// A schedule that ignores its input.
    pub fn constant(score: f64) -> Self {
        Self::new(&[], score)
    }

    pub fn score(&self, value: f64) -> f64 {
        self.bands
            .iter()
            .find(|(upper, _)| value < *upper)
            .map(|(_, score)| *score)
            .unwrap_or(self.otherwise)
    }
}

/// Blood pressure staging using systolic and diastolic jointly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressureStaging {
    /// Normal / elevated / stage 1 / stage 2+.
    Clinical {
        normal: f64,
        elevated: f64,
        stage1: f64,
        stage2: f64,
    },
    /// Normal / raised / high.
    Coarse { normal: f64, raised: f64, high: f64 },
}

impl PressureStaging {
    pub fn score(&self, bp: BloodPressure) -> f64 {
        let BloodPressure {
            systolic,
            diastolic,
        } = bp;
        let normal_range = systolic < 120 && diastolic < 80;

        match *self {
            Self::Clinical {
                normal,
                elevated,
                stage1,
                stage2,
            } => {
                if normal_range {
                    normal
                } else if systolic < 130 && diastolic < 80 {
                    elevated
                } else if systolic < 140 || diastolic < 90 {
                    stage1
                } else {
                    stage2
                }
            }
            Self::Coarse {
                normal,
                raised,
                high,
            } => {
                if normal_range {
                    normal
                } else if systolic < 140 && diastolic < 90 {
                    raised
                } else {
                    high
                }
            }
        }
    }
}

/// Maps one observed factor value to a score in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Steps(StepSchedule),
    Pressure(PressureStaging),
    Indicator { present: f64, absent: f64 },
}

impl Transform {
    /// Score a value, or `None` if this transform cannot interpret it.
    pub fn score(&self, value: FactorValue) -> Option<f64> {
        match (self, value) {
            (Self::Steps(schedule), FactorValue::Scalar(x)) => Some(schedule.score(x)),
            (Self::Pressure(staging), FactorValue::Pressure(bp)) => Some(staging.score(bp)),
            (Self::Indicator { present, absent }, FactorValue::Flag(flag)) => {
                Some(if flag { *present } else { *absent })
            }
            _ => None,
        }
    }
}

/// Transform lookup keyed by factor and disease id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformTable {
    defaults: HashMap<Factor, Transform>,
    overrides: HashMap<(Factor, String), Transform>,
}

impl Default for TransformTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl TransformTable {
    /// A table with no transforms at all. Every factor is skipped.
    pub fn empty() -> Self {
        Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        }
    }

    /// Reference schedules, with disease-specific variants for diabetes,
    /// hypertension and coronary artery disease.
    pub fn reference() -> Self {
        Self::empty()
            // Generic schedules
            .with_default(Factor::Age, Transform::Steps(StepSchedule::constant(0.5)))
            .with_default(
                Factor::BloodSugar,
                Transform::Steps(StepSchedule::new(&[(100.0, 0.3), (126.0, 0.5)], 0.7)),
            )
            .with_default(
                Factor::BloodPressure,
                Transform::Pressure(PressureStaging::Coarse {
                    normal: 0.2,
                    raised: 0.4,
                    high: 0.6,
                }),
            )
            .with_default(
                Factor::Cholesterol,
                Transform::Steps(StepSchedule::new(&[(200.0, 0.3), (240.0, 0.5)], 0.7)),
            )
            .with_default(Factor::Bmi, Transform::Steps(bmi_bands()))
            .with_default(
                Factor::Smoking,
                Transform::Indicator {
                    present: 0.8,
                    absent: 0.1,
                },
            )
            .with_default(
                Factor::FamilyHistory,
                Transform::Indicator {
                    present: 0.7,
                    absent: 0.1,
                },
            )
            .with_default(
                Factor::Diabetes,
                Transform::Indicator {
                    present: 0.8,
                    absent: 0.1,
                },
            )
            // Diabetes
            .with_override(Factor::Age, "diabetes", age_bands([0.2, 0.4, 0.7, 0.9]))
            .with_override(
                Factor::BloodSugar,
                "diabetes",
                Transform::Steps(StepSchedule::new(
                    &[(100.0, 0.1), (126.0, 0.5), (180.0, 0.8)],
                    0.95,
                )),
            )
            // Hypertension
            .with_override(Factor::Age, "hypertension", age_bands([0.1, 0.3, 0.6, 0.9]))
            .with_override(
                Factor::BloodPressure,
                "hypertension",
                Transform::Pressure(PressureStaging::Clinical {
                    normal: 0.1,
                    elevated: 0.3,
                    stage1: 0.6,
                    stage2: 0.9,
                }),
            )
            // Coronary artery disease
            .with_override(Factor::Age, "coronary", age_bands([0.1, 0.4, 0.7, 0.9]))
            .with_override(
                Factor::BloodPressure,
                "coronary",
                Transform::Pressure(PressureStaging::Clinical {
                    normal: 0.2,
                    elevated: 0.4,
                    stage1: 0.6,
                    stage2: 0.8,
                }),
            )
            .with_override(
                Factor::Cholesterol,
                "coronary",
                Transform::Steps(StepSchedule::new(&[(200.0, 0.2), (240.0, 0.5)], 0.9)),
            )
    }

    /// Set the fallback transform for a factor.
    pub fn with_default(mut self, factor: Factor, transform: Transform) -> Self {
        self.defaults.insert(factor, transform);
        self
    }

    /// Set a disease-specific transform for a factor.
    pub fn with_override(
        mut self,
        factor: Factor,
        disease_id: impl Into<String>,
        transform: Transform,
    ) -> Self {
        self.overrides.insert((factor, disease_id.into()), transform);
        self
    }

    /// Disease-specific transform if registered, else the factor default.
    pub fn get(&self, factor: Factor, disease_id: &str) -> Option<&Transform> {
        self.overrides
            .get(&(factor, disease_id.to_string()))
            .or_else(|| self.defaults.get(&factor))
    }
}

/// Four-tier age schedule: <30, <45, <60, ≥60.
fn age_bands(scores: [f64; 4]) -> Transform {
    Transform::Steps(StepSchedule::new(
        &[(30.0, scores[0]), (45.0, scores[1]), (60.0, scores[2])],
        scores[3],
    ))
}

/// WHO-style BMI bands, shared by every disease.
fn bmi_bands() -> StepSchedule {
    StepSchedule::new(
        &[
            (18.5, 0.3), // underweight
            (25.0, 0.1), // normal
            (30.0, 0.5), // overweight
            (35.0, 0.7), // obese I
            (40.0, 0.8), // obese II
        ],
        0.9,
    )
}
