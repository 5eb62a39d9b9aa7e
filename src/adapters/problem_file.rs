//! Problem files - JSON/YAML documents describing an AHP analysis.
//!
//! ```yaml
//! alternatives: [A, B, C, D]
//! criteria: [Price, Distance]
//! matrices:
//!   Price:
//!     labels: [A, B, C, D]
//!     values:
//!       - [1, 3, 5, 1]
//!       - ...
//! criterion_matrix:
//!   labels: [Price, Distance]
//!   values: [[1, 2], [0.5, 1]]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::handlers::analysis::PerformAhpAnalysisCommand;
use crate::domain::analysis::PairwiseMatrix;
use crate::domain::foundation::{parse_item_names, ValidationError};

/// Errors that can occur while reading or writing problem files.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported problem file format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Serialization format of a problem file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    Json,
    Yaml,
}

impl ProblemFormat {
    /// Picks the format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Result<Self, ProblemError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(ProblemFormat::Json),
            "yaml" | "yml" => Ok(ProblemFormat::Yaml),
            _ => Err(ProblemError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// An analysis as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AhpProblem {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    /// Alternative comparison matrix per criterion.
    #[serde(default)]
    pub matrices: BTreeMap<String, PairwiseMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion_matrix: Option<PairwiseMatrix>,
}

impl AhpProblem {
    /// A problem with all-ones matrices for every criterion and for the criteria.
    pub fn template(alternatives: Vec<String>, criteria: Vec<String>) -> Self {
        let matrices = criteria
            .iter()
            .map(|c| (c.clone(), PairwiseMatrix::ones(alternatives.clone())))
            .collect();
        let criterion_matrix = Some(PairwiseMatrix::ones(criteria.clone()));
        Self {
            alternatives,
            criteria,
            matrices,
            criterion_matrix,
        }
    }

    /// Builds a template from comma-separated names.
    pub fn from_names(alternatives: &str, criteria: &str) -> Result<Self, ProblemError> {
        let alternatives = parse_item_names(alternatives, "alternatives")?;
        let criteria = parse_item_names(criteria, "criteria")?;
        Ok(Self::template(alternatives, criteria))
    }

    pub fn parse(content: &str, format: ProblemFormat) -> Result<Self, ProblemError> {
        match format {
            ProblemFormat::Json => Ok(serde_json::from_str(content)?),
            ProblemFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }

    /// Loads a problem, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProblemError> {
        let path = path.as_ref();
        let format = ProblemFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ProblemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }

    pub fn render(&self, format: ProblemFormat) -> Result<String, ProblemError> {
        match format {
            ProblemFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ProblemFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    pub fn into_command(self, include_consistency: bool) -> PerformAhpAnalysisCommand {
        PerformAhpAnalysisCommand {
            alternatives: self.alternatives,
            criteria: self.criteria,
            criterion_matrices: self.matrices,
            criterion_matrix: self.criterion_matrix,
            include_consistency,
        }
    }
}
