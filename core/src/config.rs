//! Solver configuration
//!
//! A single serde-backed struct that callers (the runner binary, tests,
//! embedding applications) fill from JSON or build in code. Unknown keys are
//! rejected so typos surface as errors instead of silently falling back.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structures::network::Directedness;
use crate::execution::tracer::ReportMode;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Options shared by every algorithm run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Network variant chosen before any edge is added
    pub directedness: Directedness,
    /// Per-iteration events or elapsed time only
    pub report_mode: ReportMode,
    /// Independent Karger contraction sequences; 1 reproduces a single run
    pub karger_trials: usize,
    /// Base seed for Karger trials; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            directedness: Directedness::Directed,
            report_mode: ReportMode::Trace,
            karger_trials: 1,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.karger_trials == 0 {
            return Err(ConfigError::Invalid(
                "karger_trials must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
