//! Disease catalog.
//!
//! An ordered, read-only set of disease definitions. Built once and shared by
//! every engine that scores against it.

mod builtin;

pub use builtin::reference_diseases;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::models::Disease;

/// Catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Disease not found: {0}")]
    NotFound(String),

    #[error("Duplicate disease id: {0}")]
    DuplicateId(String),

    #[error("Invalid weight {weight} for factor '{factor}' of disease '{disease}'")]
    InvalidWeight {
        disease: String,
        factor: String,
        weight: f64,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Immutable, ordered disease catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseCatalog {
    diseases: Vec<Disease>,
}

impl DiseaseCatalog {
    /// Build a catalog, rejecting duplicate ids and non-positive weights.
    pub fn new(diseases: Vec<Disease>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();

        for disease in &diseases {
            if !seen.insert(disease.id.as_str()) {
                return Err(CatalogError::DuplicateId(disease.id.clone()));
            }

            for (factor, weight) in disease.weighted_factors() {
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(CatalogError::InvalidWeight {
                        disease: disease.id.clone(),
                        factor: factor.key().to_string(),
                        weight,
                    });
                }
            }

            for key in disease.unknown_factor_keys() {
                warn!(disease = %disease.id, factor = key, "Ignoring unrecognized factor weight");
            }
        }

        Ok(Self { diseases })
    }

    /// The reference catalog: diabetes, hypertension, coronary artery disease.
    pub fn builtin() -> Self {
        Self {
            diseases: reference_diseases(),
        }
    }

    /// Load a JSON array of disease definitions.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let diseases: Vec<Disease> = serde_json::from_str(json)?;
        Self::new(diseases)
    }

    /// Load a JSON array of disease definitions from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// All diseases in declaration order.
    pub fn list_diseases(&self) -> &[Disease] {
        &self.diseases
    }

    /// Look up a disease by id.
    pub fn get_disease(&self, id: &str) -> CatalogResult<&Disease> {
        self.diseases
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.diseases.iter().map(|d| d.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

impl Default for DiseaseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
