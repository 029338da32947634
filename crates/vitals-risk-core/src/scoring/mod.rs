//! Risk scoring engine.
//!
//! Per disease: weighted average of the observed factor scores → variance
//! multiplier → clamp to [0, 1] → severity. Results are ranked by probability,
//! highest first, with ties kept in catalog order.

mod transforms;
mod variance;

pub use transforms::*;
pub use variance::*;

use std::cmp::Ordering;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, DiseaseCatalog};
use crate::config::{ConfigError, ScoringConfig};
use crate::models::{
    Disease, DiseaseScore, FactorContribution, PatientData, PredictionResult, RiskAssessment,
    ValidationError,
};

/// Scoring errors.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid patient data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// Scores patient records against a shared disease catalog.
pub struct RiskEngine {
    catalog: Arc<DiseaseCatalog>,
    transforms: TransformTable,
    config: ScoringConfig,
    variance: Box<dyn VarianceSource>,
}

impl RiskEngine {
    /// Create an engine with reference transforms, default configuration and
    /// thread-local random variance.
    pub fn new(catalog: Arc<DiseaseCatalog>) -> Self {
        Self {
            catalog,
            transforms: TransformTable::reference(),
            config: ScoringConfig::default(),
            variance: Box::new(ThreadRngVariance),
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: ScoringConfig) -> ScoringResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_transforms(mut self, transforms: TransformTable) -> Self {
        self.transforms = transforms;
        self
    }

    /// Substitute the variance source, e.g. `FixedVariance::neutral()` in tests.
    pub fn with_variance<V: VarianceSource + 'static>(mut self, variance: V) -> Self {
        self.variance = Box::new(variance);
        self
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// One prediction per catalog disease, highest probability first.
    ///
    /// Never fails: missing optional inputs only narrow the set of factors
    /// that participate for each disease.
    pub fn evaluate(&self, patient: &PatientData) -> Vec<PredictionResult> {
        self.score_all(patient)
            .iter()
            .map(DiseaseScore::to_prediction)
            .collect()
    }

    /// Full breakdowns for every catalog disease, ranked like [`Self::evaluate`].
    pub fn score_all(&self, patient: &PatientData) -> Vec<DiseaseScore> {
        let mut scores: Vec<DiseaseScore> = self
            .catalog
            .list_diseases()
            .iter()
            .map(|disease| self.score_disease(disease, patient))
            .collect();

        // Stable: ties keep catalog order
        scores.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });

        scores
    }

    /// Validate the record, then evaluate it into a timestamped assessment.
    pub fn assess(&self, patient: &PatientData) -> ScoringResult<RiskAssessment> {
        patient.validate()?;

        let results = self.evaluate(patient);
        let assessment = RiskAssessment::new(patient.id.clone(), results);

        info!(
            assessment_id = %assessment.assessment_id,
            patient_id = ?patient.id,
            results = assessment.results.len(),
            top = ?assessment.top().map(|r| r.disease_id.as_str()),
            "Risk assessment completed"
        );

        Ok(assessment)
    }

    /// Breakdown for a single disease by id.
    pub fn explain(&self, patient: &PatientData, disease_id: &str) -> ScoringResult<DiseaseScore> {
        let disease = self.catalog.get_disease(disease_id)?;
        Ok(self.score_disease(disease, patient))
    }

    /// Score one disease. Only factors that are both weighted by the disease
    /// and observed in the record contribute, to numerator and denominator alike.
    pub fn score_disease(&self, disease: &Disease, patient: &PatientData) -> DiseaseScore {
        let contributions: Vec<FactorContribution> = disease
            .weighted_factors()
            .filter_map(|(factor, weight)| {
                let value =
                    FactorValue::observe(factor, patient, &disease.id, self.config.flag_policy)?;
                let transform = self.transforms.get(factor, &disease.id)?;

                match transform.score(value) {
                    Some(score) => Some(FactorContribution {
                        factor,
                        score,
                        weight,
                    }),
                    None => {
                        warn!(
                            disease = %disease.id,
                            factor = %factor,
                            "Transform cannot score observed value, skipping factor"
                        );
                        None
                    }
                }
            })
            .collect();

        let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
        let weighted_sum: f64 = contributions.iter().map(FactorContribution::weighted).sum();
        let weighted_average = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };

        let multiplier = self.variance.multiplier(self.config.jitter);
        let perturbed = weighted_average * multiplier;
        let probability = if perturbed.is_finite() {
            perturbed.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let severity = self.config.severity.classify(probability);

        debug!(
            disease = %disease.id,
            factors = contributions.len(),
            total_weight,
            weighted_average,
            multiplier,
            probability,
            %severity,
            "Scored disease"
        );

        DiseaseScore {
            disease_id: disease.id.clone(),
            disease: disease.name.clone(),
            description: disease.description.clone(),
            contributions,
            total_weight,
            weighted_average,
            multiplier,
            probability,
            severity,
        }
    }
}

impl std::fmt::Debug for RiskEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskEngine")
            .field("diseases", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
