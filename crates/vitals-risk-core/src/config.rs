//! Scoring configuration.
//!
//! Defaults reproduce the reference behaviour: a 0.9 - 1.1 variance band,
//! severity cut-offs at 0.33 / 0.66, and smoking / diabetes terms that only
//! participate when the flag is set.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SeverityThresholds;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid variance range: min {min} must be finite, non-negative and <= max {max}")]
    InvalidJitter { min: f64, max: f64 },

    #[error("Invalid severity thresholds: expected 0 <= medium ({medium}) <= high ({high}) <= 1")]
    InvalidThresholds { medium: f64, high: f64 },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Bounds of the multiplicative variance applied to each probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterRange {
    pub min: f64,
    pub max: f64,
}

impl Default for JitterRange {
    fn default() -> Self {
        Self { min: 0.9, max: 1.1 }
    }
}

impl JitterRange {
    /// A range that always yields exactly 1.0.
    pub fn neutral() -> Self {
        Self { min: 1.0, max: 1.0 }
    }

    pub fn contains(&self, multiplier: f64) -> bool {
        multiplier >= self.min && multiplier <= self.max
    }
}

/// How boolean history flags (smoking, diabetic) enter the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagPolicy {
    /// Only a `true` flag contributes; `false` and absent are both skipped.
    #[default]
    Truthy,
    /// Any supplied flag contributes; `false` scores the baseline value.
    Observed,
}

impl FlagPolicy {
    /// Reduce an optional flag to the value that should be scored, if any.
    pub fn observe(&self, flag: Option<bool>) -> Option<bool> {
        match self {
            Self::Truthy => flag.filter(|set| *set),
            Self::Observed => flag,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    pub jitter: JitterRange,
    pub severity: SeverityThresholds,
    pub flag_policy: FlagPolicy,
}

impl ScoringConfig {
    /// Parse and validate a JSON document. Missing keys use defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that the variance band and severity thresholds are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let JitterRange { min, max } = self.jitter;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidJitter { min, max });
        }

        let SeverityThresholds { medium, high } = self.severity;
        let ordered = 0.0 <= medium && medium <= high && high <= 1.0;
        if !ordered {
            return Err(ConfigError::InvalidThresholds { medium, high });
        }

        Ok(())
    }

    pub fn with_flag_policy(mut self, policy: FlagPolicy) -> Self {
        self.flag_policy = policy;
        self
    }

    pub fn with_jitter(mut self, jitter: JitterRange) -> Self {
        self.jitter = jitter;
        self
    }
}
