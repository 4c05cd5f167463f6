//! Analytic methods and their conjugate priors.

use std::fmt;
use std::str::FromStr;

use ab_common::Error;
use ab_config::{BetaParams, ConversionPrior, GammaParams};
use serde::{Deserialize, Serialize};

/// Metric type of an experiment, selecting the likelihood/prior pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyticMethod {
    /// Binomial successes with a Beta prior.
    #[serde(rename = "conversion")]
    Conversion,
    /// Exponential magnitudes with a Gamma prior on the rate.
    #[serde(rename = "numeric, continuous")]
    NumericContinuous,
    /// Poisson counts with a Gamma prior on the rate.
    #[serde(rename = "numeric, discrete")]
    NumericDiscrete,
}

impl AnalyticMethod {
    pub const ALL: [AnalyticMethod; 3] = [
        AnalyticMethod::Conversion,
        AnalyticMethod::NumericContinuous,
        AnalyticMethod::NumericDiscrete,
    ];

    /// Canonical name as shown in the method selector.
    pub fn as_str(self) -> &'static str {
        match self {
            AnalyticMethod::Conversion => "conversion",
            AnalyticMethod::NumericContinuous => "numeric, continuous",
            AnalyticMethod::NumericDiscrete => "numeric, discrete",
        }
    }

    /// Numeric methods require `sum_numeric` on every observation.
    pub fn is_numeric(self) -> bool {
        !matches!(self, AnalyticMethod::Conversion)
    }

    /// Resolve the prior hyperparameters this method samples from.
    pub fn priors(self, conversion: ConversionPrior, gamma: GammaParams) -> ModelPriors {
        match self {
            AnalyticMethod::Conversion => ModelPriors::Conversion(conversion.to_beta()),
            AnalyticMethod::NumericContinuous => ModelPriors::NumericContinuous(gamma),
            AnalyticMethod::NumericDiscrete => ModelPriors::NumericDiscrete(gamma),
        }
    }
}

impl fmt::Display for AnalyticMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticMethod {
    type Err = Error;

    /// Accepts `conversion`, `numeric, continuous`, `numeric, discrete` and
    /// their kebab/snake spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .to_ascii_lowercase()
            .replace(|c: char| matches!(c, ',' | '-' | '_'), " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        match normalized.as_str() {
            "conversion" => Ok(AnalyticMethod::Conversion),
            "numeric continuous" => Ok(AnalyticMethod::NumericContinuous),
            "numeric discrete" => Ok(AnalyticMethod::NumericDiscrete),
            _ => Err(Error::UnsupportedModel(s.to_string())),
        }
    }
}

/// Prior hyperparameters resolved for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelPriors {
    Conversion(BetaParams),
    NumericContinuous(GammaParams),
    NumericDiscrete(GammaParams),
}

impl ModelPriors {
    pub fn method(&self) -> AnalyticMethod {
        match self {
            ModelPriors::Conversion(_) => AnalyticMethod::Conversion,
            ModelPriors::NumericContinuous(_) => AnalyticMethod::NumericContinuous,
            ModelPriors::NumericDiscrete(_) => AnalyticMethod::NumericDiscrete,
        }
    }

    /// The two hyperparameters in display order: (alpha, beta) or (shape, scale).
    pub fn hyperparameters(&self) -> (f64, f64) {
        match self {
            ModelPriors::Conversion(b) => (b.alpha, b.beta),
            ModelPriors::NumericContinuous(g) | ModelPriors::NumericDiscrete(g) => {
                (g.shape, g.scale)
            }
        }
    }
}
