//! Disease catalog models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A clinical input that can drive a disease's likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
    Age,
    BloodSugar,
    BloodPressure,
    Cholesterol,
    Bmi,
    Smoking,
    FamilyHistory,
    /// The patient's own diabetic status, as a comorbidity
    Diabetes,
}

impl Factor {
    /// Every factor, in scoring order.
    pub const ALL: [Factor; 8] = [
        Factor::Age,
        Factor::BloodSugar,
        Factor::BloodPressure,
        Factor::Cholesterol,
        Factor::Bmi,
        Factor::Smoking,
        Factor::FamilyHistory,
        Factor::Diabetes,
    ];

    /// Weight-map key for this factor.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::BloodSugar => "bloodSugar",
            Self::BloodPressure => "bloodPressure",
            Self::Cholesterol => "cholesterol",
            Self::Bmi => "bmi",
            Self::Smoking => "smoking",
            Self::FamilyHistory => "familyHistory",
            Self::Diabetes => "diabetes",
        }
    }

    /// Parse a weight-map key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A disease definition in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    /// Unique key, also used in patient family histories
    pub id: String,
    /// Display name
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub treatment_options: Vec<String>,
    /// Factor key → weight. Keys outside the known factor set are kept but never scored.
    #[serde(default)]
    pub factors_weights: BTreeMap<String, f64>,
}

impl Disease {
    /// Create a disease with required fields and no weighted factors.
    pub fn new(id: String, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            symptoms: Vec::new(),
            risk_factors: Vec::new(),
            treatment_options: Vec::new(),
            factors_weights: BTreeMap::new(),
        }
    }

    /// Builder-style helper for declaring a factor weight.
    pub fn with_weight(mut self, factor: Factor, weight: f64) -> Self {
        self.factors_weights.insert(factor.key().to_string(), weight);
        self
    }

    /// Weight declared for a factor, if any.
    pub fn weight(&self, factor: Factor) -> Option<f64> {
        self.factors_weights.get(factor.key()).copied()
    }

    /// Recognised factors with their weights, in scoring order.
    pub fn weighted_factors(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL
            .into_iter()
            .filter_map(|factor| self.weight(factor).map(|w| (factor, w)))
    }

    /// Weight-map keys that do not name a known factor.
    pub fn unknown_factor_keys(&self) -> Vec<&str> {
        self.factors_weights
            .keys()
            .map(String::as_str)
            .filter(|key| Factor::from_key(key).is_none())
            .collect()
    }
}
