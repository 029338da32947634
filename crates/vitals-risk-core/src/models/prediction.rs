//! Prediction output models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::disease::Factor;

/// Coarse risk tier derived from a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Classify a probability in [0, 1] with the default thresholds.
    pub fn from_probability(probability: f64) -> Self {
        SeverityThresholds::default().classify(probability)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Lower bounds (inclusive) of the medium and high tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            medium: 0.33,
            high: 0.66,
        }
    }
}

impl SeverityThresholds {
    /// Strict less-than on both boundaries: exactly `medium` is medium.
    pub fn classify(&self, probability: f64) -> Severity {
        if probability < self.medium {
            Severity::Low
        } else if probability < self.high {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}

/// One disease's entry in a ranked prediction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub disease_id: String,
    /// Disease display name
    pub disease: String,
    /// Likelihood as a percentage (0 - 100)
    pub probability: f64,
    pub description: String,
    pub severity: Severity,
}

/// A single observed factor's part in a disease score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorContribution {
    pub factor: Factor,
    /// Transformed factor score (0.0 - 1.0)
    pub score: f64,
    pub weight: f64,
}

impl FactorContribution {
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }
}

/// Full scoring breakdown for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseScore {
    pub disease_id: String,
    pub disease: String,
    pub description: String,
    /// Factors that were both weighted and observed
    pub contributions: Vec<FactorContribution>,
    /// Sum of the participating weights
    pub total_weight: f64,
    /// Weighted average of factor scores, before perturbation
    pub weighted_average: f64,
    /// Variance multiplier applied to the weighted average
    pub multiplier: f64,
    /// Final probability after perturbation and clamping (0.0 - 1.0)
    pub probability: f64,
    pub severity: Severity,
}

impl DiseaseScore {
    /// Percentage form for display.
    pub fn to_prediction(&self) -> PredictionResult {
        PredictionResult {
            disease_id: self.disease_id.clone(),
            disease: self.disease.clone(),
            probability: (self.probability * 100.0).clamp(0.0, 100.0),
            description: self.description.clone(),
            severity: self.severity,
        }
    }
}

/// A ranked set of predictions for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Unique identifier (UUID v4)
    pub assessment_id: String,
    pub patient_id: Option<String>,
    /// RFC 3339 timestamp
    pub assessed_at: String,
    /// Sorted by probability, highest first
    pub results: Vec<PredictionResult>,
}

impl RiskAssessment {
    /// Wrap ranked results with a fresh id and timestamp.
    pub fn new(patient_id: Option<String>, results: Vec<PredictionResult>) -> Self {
        Self {
            assessment_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            assessed_at: chrono::Utc::now().to_rfc3339(),
            results,
        }
    }

    /// The most likely disease, if the catalog was non-empty.
    pub fn top(&self) -> Option<&PredictionResult> {
        self.results.first()
    }

    /// Results at the given severity, in ranked order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &PredictionResult> + '_ {
        self.results.iter().filter(move |r| r.severity == severity)
    }

    /// Serialize for hand-off to a display layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
