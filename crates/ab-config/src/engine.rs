//! Engine settings: Monte Carlo size, seed, priors, and the leader threshold.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::priors::{ConversionPrior, GammaParams};
use crate::validate::{ValidationError, ValidationResult};

/// Default number of posterior draws per variant.
pub const DEFAULT_SIMULATION_SIZE: usize = 10_000;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 9;

/// Default significance threshold (percent) for declaring a leader.
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 95.0;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo draws per variant. Must be at least 1.
    pub simulation_size: usize,

    /// Seed for the per-evaluation RNG stream.
    pub seed: u64,

    /// Probability to be best (percent) a variant must exceed to lead.
    pub significance_threshold: f64,

    pub conversion_prior: ConversionPrior,

    pub gamma_prior: GammaParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation_size: DEFAULT_SIMULATION_SIZE,
            seed: DEFAULT_SEED,
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
            conversion_prior: ConversionPrior::default(),
            gamma_prior: GammaParams::weak(),
        }
    }
}

impl EngineConfig {
    /// Load a config file, choosing the parser by extension (`.json`, else TOML).
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_toml(&content)
        }
    }

    /// Parse a config from a JSON string.
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Parse a config from a TOML string.
    pub fn parse_toml(text: &str) -> ValidationResult<Self> {
        toml::from_str(text).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.simulation_size == 0 {
            return Err(ValidationError::invalid(
                "simulation_size",
                "must be at least 1",
            ));
        }
        if !(0.0..=100.0).contains(&self.significance_threshold) {
            return Err(ValidationError::invalid(
                "significance_threshold",
                format!("must be within [0, 100], got {}", self.significance_threshold),
            ));
        }
        self.conversion_prior.to_beta().validate()?;
        self.gamma_prior.validate()?;
        Ok(())
    }
}
