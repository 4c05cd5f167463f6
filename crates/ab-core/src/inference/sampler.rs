//! Posterior sampler.
//!
//! Each variant's observation is folded into the model's conjugate prior to
//! obtain a closed-form posterior, from which `simulation_size` draws are
//! taken. All columns come from one RNG stream seeded per evaluation, so
//! identical inputs and seed reproduce the matrix bit for bit.
//!
//! | model              | posterior                                   | drawn value |
//! |--------------------|---------------------------------------------|-------------|
//! | conversion         | Beta(α + conversions, β + failures)         | rate        |
//! | numeric-continuous | Gamma(k + conversions, θ / (1 + θ·sum))     | 1 / rate    |
//! | numeric-discrete   | Gamma(k + sum, θ / (1 + θ·conversions))     | rate        |

use ab_common::{Error, Result};
use ab_config::{BetaParams, GammaParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Gamma};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ModelPriors;
use crate::observation::VariantObservation;
use crate::inference::simulation::SimulationMatrix;

/// Closed-form posterior of one variant's latent parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Posterior {
    /// Conversion rate.
    Beta(BetaParams),
    /// Rate of an exponential or Poisson process. When `reciprocal` is set
    /// the drawn value is `1 / rate`, the implied mean magnitude.
    Gamma { params: GammaParams, reciprocal: bool },
}

impl Posterior {
    /// Conjugate update of `priors` with one variant's data.
    ///
    /// The discrete model uses `conversions` as the exposure term and
    /// `sum_numeric` as the event count.
    pub fn from_observation(priors: &ModelPriors, obs: &VariantObservation) -> Self {
        let conversions = obs.conversions as f64;
        let sum = obs.sum_numeric.unwrap_or(0.0);
        match priors {
            ModelPriors::Conversion(prior) => {
                Posterior::Beta(prior.update(conversions, obs.failures() as f64))
            }
            ModelPriors::NumericContinuous(prior) => Posterior::Gamma {
                params: prior.update(conversions, sum),
                reciprocal: true,
            },
            ModelPriors::NumericDiscrete(prior) => Posterior::Gamma {
                params: prior.update(sum, conversions),
                reciprocal: false,
            },
        }
    }

    /// Closed-form expectation of the drawn value.
    ///
    /// For the reciprocal Gamma this is `1 / (scale * (shape - 1))`, infinite
    /// when `shape <= 1`.
    pub fn expected_value(&self) -> f64 {
        match self {
            Posterior::Beta(b) => b.mean(),
            Posterior::Gamma {
                params,
                reciprocal: false,
            } => params.mean(),
            Posterior::Gamma {
                params,
                reciprocal: true,
            } => {
                if params.shape <= 1.0 {
                    f64::INFINITY
                } else {
                    1.0 / (params.scale * (params.shape - 1.0))
                }
            }
        }
    }

    /// Draw `n` samples of the posterior quantity.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        match *self {
            Posterior::Beta(p) => {
                let dist = Beta::new(p.alpha, p.beta).map_err(|e| {
                    Error::Sampling(format!("Beta({}, {}): {}", p.alpha, p.beta, e))
                })?;
                Ok((0..n).map(|_| dist.sample(rng)).collect())
            }
            Posterior::Gamma { params, reciprocal } => {
                let dist = Gamma::new(params.shape, params.scale).map_err(|e| {
                    Error::Sampling(format!(
                        "Gamma(shape={}, scale={}): {}",
                        params.shape, params.scale, e
                    ))
                })?;
                if reciprocal {
                    Ok((0..n).map(|_| 1.0 / dist.sample(rng)).collect())
                } else {
                    Ok((0..n).map(|_| dist.sample(rng)).collect())
                }
            }
        }
    }
}

/// Draw the full simulation matrix for a set of (already validated)
/// observations.
///
/// Columns are drawn in input order from a single `StdRng` seeded with
/// `seed`.
pub fn sample_posteriors(
    priors: &ModelPriors,
    observations: &[VariantObservation],
    simulation_size: usize,
    seed: u64,
) -> Result<SimulationMatrix> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = SimulationMatrix::with_rows(simulation_size);

    for obs in observations {
        let posterior = Posterior::from_observation(priors, obs);
        debug!(
            variant = %obs.variant,
            posterior = ?posterior,
            expected = posterior.expected_value(),
            "drawing posterior column"
        );
        let samples = posterior.draw(&mut rng, simulation_size)?;
        matrix.push_column(obs.variant.clone(), samples)?;
    }

    Ok(matrix)
}
