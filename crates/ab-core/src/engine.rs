//! Bayesian evaluation engine.
//!
//! [`BayesianEngine`] holds only its construction parameters. Every call to
//! [`BayesianEngine::evaluate`] seeds its own RNG from the engine seed, so a
//! shared engine is safe to use from several threads and each call is
//! reproducible on its own.

use std::time::Instant;

use ab_common::{Error, Result, VariantId};
use ab_config::{ConversionPrior, EngineConfig, GammaParams, ValidationError};
use ab_math::SampleSummary;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::describe::describe;
use crate::inference::{estimate_best, sample_posteriors, ProbabilityTable, SimulationMatrix};
use crate::model::{AnalyticMethod, ModelPriors};
use crate::observation::{validate_observations, VariantObservation};

/// Everything one evaluation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub method: AnalyticMethod,
    pub priors: ModelPriors,
    pub simulation_size: usize,
    pub seed: u64,
    /// Winners only, highest first. Use [`EvaluationResult::filled_probabilities`]
    /// for a row per variant.
    pub probabilities: ProbabilityTable,
    pub simulations: SimulationMatrix,
}

impl EvaluationResult {
    /// Explanatory paragraph for the model and priors used.
    pub fn describe(&self) -> String {
        describe(&self.priors)
    }

    /// One row per evaluated variant in input order, 0 for never-winners.
    pub fn filled_probabilities(&self) -> ProbabilityTable {
        self.probabilities.filled(self.simulations.variants())
    }

    pub fn probability_to_be_best(&self, variant: &str) -> f64 {
        self.probabilities.get(variant).unwrap_or(0.0)
    }

    pub fn posterior_summaries(&self) -> Vec<(VariantId, Option<SampleSummary>)> {
        self.simulations.summaries()
    }
}

/// Monte Carlo evaluator for multi-variant experiments.
#[derive(Debug, Clone, PartialEq)]
pub struct BayesianEngine {
    simulation_size: usize,
    seed: u64,
    gamma_prior: GammaParams,
}

impl Default for BayesianEngine {
    fn default() -> Self {
        Self {
            simulation_size: ab_config::engine::DEFAULT_SIMULATION_SIZE,
            seed: ab_config::engine::DEFAULT_SEED,
            gamma_prior: GammaParams::weak(),
        }
    }
}

impl BayesianEngine {
    /// Create an engine drawing `simulation_size` samples per variant.
    pub fn new(simulation_size: usize, seed: u64) -> Result<Self> {
        if simulation_size == 0 {
            return Err(Error::InvalidConfig(
                "simulation_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            simulation_size,
            seed,
            gamma_prior: GammaParams::weak(),
        })
    }

    /// Build from a resolved configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate().map_err(config_error)?;
        Ok(Self {
            simulation_size: config.simulation_size,
            seed: config.seed,
            gamma_prior: config.gamma_prior,
        })
    }

    /// Replace the Gamma prior used by both numeric models.
    pub fn with_gamma_prior(mut self, prior: GammaParams) -> Result<Self> {
        prior.validate().map_err(config_error)?;
        self.gamma_prior = prior;
        Ok(self)
    }

    pub fn simulation_size(&self) -> usize {
        self.simulation_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn gamma_prior(&self) -> GammaParams {
        self.gamma_prior
    }

    /// Evaluate observations under `method`.
    ///
    /// `conversion_prior` supplies pseudo-counts for the conversion model and
    /// is ignored by the numeric models.
    pub fn evaluate(
        &self,
        observations: &[VariantObservation],
        conversion_prior: ConversionPrior,
        method: AnalyticMethod,
    ) -> Result<EvaluationResult> {
        let priors = method.priors(conversion_prior, self.gamma_prior);
        self.evaluate_with_priors(observations, priors)
    }

    /// Like [`BayesianEngine::evaluate`] with the model given by name.
    pub fn evaluate_named(
        &self,
        observations: &[VariantObservation],
        conversion_prior: ConversionPrior,
        model: &str,
    ) -> Result<EvaluationResult> {
        let method: AnalyticMethod = model.parse()?;
        self.evaluate(observations, conversion_prior, method)
    }

    /// Evaluate with fully resolved priors.
    pub fn evaluate_with_priors(
        &self,
        observations: &[VariantObservation],
        priors: ModelPriors,
    ) -> Result<EvaluationResult> {
        let method = priors.method();
        validate_observations(method, observations)?;

        let started = Instant::now();
        let simulations =
            sample_posteriors(&priors, observations, self.simulation_size, self.seed)?;
        let probabilities = estimate_best(&simulations);

        info!(
            model = %method,
            variants = observations.len(),
            simulation_size = self.simulation_size,
            seed = self.seed,
            winners = probabilities.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "evaluation complete"
        );

        Ok(EvaluationResult {
            method,
            priors,
            simulation_size: self.simulation_size,
            seed: self.seed,
            probabilities,
            simulations,
        })
    }
}

/// Map a configuration failure into the shared error type.
pub fn config_error(err: ValidationError) -> Error {
    if err.is_semantic() {
        Error::InvalidConfig(err.to_string())
    } else {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_config::BetaParams;

    fn ab() -> Vec<VariantObservation> {
        vec![
            VariantObservation::conversion("A", 1000, 100),
            VariantObservation::conversion("B", 1000, 150),
        ]
    }

    #[test]
    fn zero_simulation_size_rejected() {
        assert!(matches!(
            BayesianEngine::new(0, 9),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn result_carries_priors_and_shape() {
        let engine = BayesianEngine::new(2_000, 9).unwrap();
        let result = engine
            .evaluate(&ab(), ConversionPrior::new(1, 1), AnalyticMethod::Conversion)
            .unwrap();
        assert_eq!(result.priors, ModelPriors::Conversion(BetaParams::new(2.0, 2.0)));
        assert_eq!(result.simulations.rows(), 2_000);
        assert_eq!(result.simulations.n_columns(), 2);
        assert_eq!(result.filled_probabilities().len(), 2);
    }

    #[test]
    fn unknown_model_name_fails_before_sampling() {
        let engine = BayesianEngine::default();
        let err = engine
            .evaluate_named(&ab(), ConversionPrior::default(), "bernoulli")
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel(_)));
    }

    #[test]
    fn invalid_observation_fails_fast() {
        let engine = BayesianEngine::default();
        let obs = vec![VariantObservation::conversion("A", 0, 0)];
        let err = engine
            .evaluate(&obs, ConversionPrior::default(), AnalyticMethod::Conversion)
            .unwrap_err();
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn from_config_uses_gamma_prior() {
        let config = EngineConfig {
            simulation_size: 100,
            gamma_prior: GammaParams::new(1.0, 2.0),
            ..Default::default()
        };
        let engine = BayesianEngine::from_config(&config).unwrap();
        let obs = vec![VariantObservation::numeric("A", 10, 4, 20.0)];
        let result = engine
            .evaluate(&obs, ConversionPrior::default(), AnalyticMethod::NumericDiscrete)
            .unwrap();
        assert_eq!(result.priors.hyperparameters(), (1.0, 2.0));
    }

    #[test]
    fn invalid_gamma_prior_is_config_error() {
        let err = BayesianEngine::default()
            .with_gamma_prior(GammaParams::new(0.0, 0.1))
            .unwrap_err();
        assert_eq!(err.code(), 11);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(BayesianEngine::new(500, 3).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .evaluate(&ab(), ConversionPrior::default(), AnalyticMethod::Conversion)
                        .unwrap()
                        .simulations
                })
            })
            .collect();
        let matrices: Vec<SimulationMatrix> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(matrices.windows(2).all(|w| w[0] == w[1]));
    }
}
