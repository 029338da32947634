//! Vitals-Risk Core Library
//!
//! Deterministic weighted-factor disease risk scoring over patient vitals and
//! history.
//!
//! # Architecture
//!
//! ```text
//! PatientData ──► RiskEngine ──────────────► Vec<PredictionResult>
//!                    │    ▲                    (highest probability first)
//!                    │    │
//!                    │    └── VarianceSource (thread rng / seeded / fixed)
//!                    ▼
//!             DiseaseCatalog ──► factorsWeights ──► TransformTable
//!             (read-only, shared)                  (factor, disease) → score
//! ```
//!
//! For each disease the engine takes a weighted average over the factors the
//! disease weights *and* the record supplies, perturbs it by a bounded random
//! multiplier, clamps it to [0, 1] and classifies severity.
//!
//! # Modules
//!
//! - [`catalog`]: Disease catalog and the built-in reference diseases
//! - [`config`]: Variance band, severity thresholds, flag policy
//! - [`models`]: Domain types (PatientData, Disease, PredictionResult, etc.)
//! - [`scoring`]: Risk engine, factor transforms, variance sources
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vitals_risk_core::{DiseaseCatalog, FixedVariance, Gender, PatientData, RiskEngine};
//!
//! let engine = RiskEngine::new(Arc::new(DiseaseCatalog::builtin()))
//!     .with_variance(FixedVariance::neutral());
//!
//! let patient = PatientData::new(52, Gender::Female, 165.0, 72.0);
//! let results = engine.evaluate(&patient);
//!
//! assert_eq!(results.len(), 3);
//! assert!(results.iter().all(|r| (0.0..=100.0).contains(&r.probability)));
//! ```

pub mod catalog;
pub mod config;
pub mod models;
pub mod scoring;

// Re-export commonly used types
pub use catalog::{CatalogError, DiseaseCatalog};
pub use config::{ConfigError, FlagPolicy, JitterRange, ScoringConfig};
pub use models::{
    BloodPressure, Disease, DiseaseScore, Factor, FactorContribution, Gender, PatientData,
    PredictionResult, RiskAssessment, Severity, SeverityThresholds, ValidationError,
};
pub use scoring::{
    FixedVariance, RiskEngine, ScoringError, SeededVariance, ThreadRngVariance, TransformTable,
    VarianceSource,
};

// =========================================================================
// Crate Error Type
// =========================================================================

/// Any error surfaced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid patient data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ScoringError> for Error {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::Catalog(e) => Error::Catalog(e),
            ScoringError::Validation(e) => Error::Validation(e),
            ScoringError::Config(e) => Error::Config(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// =========================================================================
// Convenience Entry Points
// =========================================================================

/// Score a JSON patient record against the built-in catalog.
///
/// Returns the ranked predictions as JSON.
pub fn predict_json(patient_json: &str) -> Result<String> {
    let patient: PatientData = serde_json::from_str(patient_json)?;
    let engine = RiskEngine::new(std::sync::Arc::new(DiseaseCatalog::builtin()));
    let assessment = engine.assess(&patient)?;
    Ok(assessment.to_json()?)
}
