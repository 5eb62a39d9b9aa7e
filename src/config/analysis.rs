//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{
    AhpSettings, ConsistencyMethod, ValidationMode, DEFAULT_CONSISTENCY_THRESHOLD,
    DEFAULT_WEIGHT_PRECISION,
};

/// Largest accepted `weight_precision`.
pub const MAX_WEIGHT_PRECISION: u32 = 10;

/// Settings for the AHP calculator
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Decimal places kept in priority weights
    #[serde(default = "default_weight_precision")]
    pub weight_precision: u32,

    /// `strict` rejects degenerate input, `lenient` lets it propagate
    #[serde(default)]
    pub validation: ValidationMode,

    /// `eigenvalue` or `legacy` consistency ratio formula
    #[serde(default)]
    pub consistency_method: ConsistencyMethod,

    /// Largest consistency ratio considered acceptable
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,
}

impl AnalysisConfig {
    /// Settings to hand to the calculator
    pub fn settings(&self) -> AhpSettings {
        AhpSettings {
            weight_precision: self.weight_precision,
            validation: self.validation,
            consistency_method: self.consistency_method,
            consistency_threshold: self.consistency_threshold,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.weight_precision > MAX_WEIGHT_PRECISION {
            return Err(ValidationError::InvalidPrecision {
                max: MAX_WEIGHT_PRECISION,
                actual: self.weight_precision,
            });
        }
        if !(self.consistency_threshold > 0.0 && self.consistency_threshold <= 1.0) {
            return Err(ValidationError::InvalidThreshold(self.consistency_threshold));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weight_precision: default_weight_precision(),
            validation: ValidationMode::default(),
            consistency_method: ConsistencyMethod::default(),
            consistency_threshold: default_consistency_threshold(),
        }
    }
}

fn default_weight_precision() -> u32 {
    DEFAULT_WEIGHT_PRECISION
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}
