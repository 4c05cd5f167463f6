//! Conjugate prior hyperparameter types.
//!
//! The conversion model uses a Beta prior built from pseudo-counts; both
//! numeric models share one weak Gamma prior.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Beta distribution parameters: Beta(alpha, beta).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Create uniform (uninformative) Beta(1, 1) priors.
    pub fn uniform() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Conjugate update with binomial data.
    pub fn update(&self, successes: f64, failures: f64) -> Self {
        Self::new(self.alpha + successes, self.beta + failures)
    }

    /// Calculate the mean of the Beta distribution: alpha / (alpha + beta).
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if !(self.alpha > 0.0 && self.beta > 0.0) {
            return Err(ValidationError::invalid(
                "beta",
                format!("alpha and beta must be positive, got ({}, {})", self.alpha, self.beta),
            ));
        }
        Ok(())
    }
}

impl Default for BetaParams {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Gamma distribution parameters: Gamma(shape, scale).
/// Note: uses SCALE parameterization (scale = 1/rate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GammaParams {
    pub shape: f64,
    pub scale: f64,
}

impl GammaParams {
    pub fn new(shape: f64, scale: f64) -> Self {
        Self { shape, scale }
    }

    /// The weak Gamma(0.1, 0.1) prior shared by both numeric models.
    pub fn weak() -> Self {
        Self::new(0.1, 0.1)
    }

    /// Conjugate update: `shape + events`, `scale / (1 + scale * exposure)`.
    pub fn update(&self, events: f64, exposure: f64) -> Self {
        Self::new(
            self.shape + events,
            self.scale / (1.0 + self.scale * exposure),
        )
    }

    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if !(self.shape > 0.0 && self.scale > 0.0) || !self.shape.is_finite() || !self.scale.is_finite() {
            return Err(ValidationError::invalid(
                "gamma_prior",
                format!("shape and scale must be positive, got ({}, {})", self.shape, self.scale),
            ));
        }
        Ok(())
    }
}

impl Default for GammaParams {
    fn default() -> Self {
        Self::weak()
    }
}

/// Pseudo-counts added to the uniform Beta(1, 1) conversion prior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConversionPrior {
    #[serde(default)]
    pub prior_success: u64,
    #[serde(default)]
    pub prior_failure: u64,
}

impl ConversionPrior {
    pub fn new(prior_success: u64, prior_failure: u64) -> Self {
        Self {
            prior_success,
            prior_failure,
        }
    }

    /// Beta(prior_success + 1, prior_failure + 1).
    pub fn to_beta(&self) -> BetaParams {
        BetaParams::new(
            self.prior_success as f64 + 1.0,
            self.prior_failure as f64 + 1.0,
        )
    }
}
