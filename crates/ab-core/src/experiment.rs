//! Experiment facade: collect observations, calculate, then read results.
//!
//! This is the state a calculator front-end holds between "enter data" and
//! "render results". Reading results before [`Experiment::calculate`] fails
//! with [`Error::UninitializedState`].

use ab_common::{Error, Result, VariantId};
use ab_config::ConversionPrior;
use ab_math::round_to;
use serde::{Deserialize, Serialize};

use crate::engine::{BayesianEngine, EvaluationResult};
use crate::model::AnalyticMethod;
use crate::observation::{validate_observations, VariantObservation};

/// Input row joined with its probability to be best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub variant: VariantId,
    pub sample_size: u64,
    pub conversions: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_numeric: Option<f64>,
    /// conversions / sample_size, as a fraction.
    pub conversion_rate: f64,
    /// sum_numeric / conversions, rounded to 4 decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_numeric_metric: Option<f64>,
    pub probability_to_be_best: f64,
}

#[derive(Debug, Clone)]
pub struct Experiment {
    method: AnalyticMethod,
    observations: Vec<VariantObservation>,
    result: Option<EvaluationResult>,
}

impl Experiment {
    /// Validate and hold the experiment data.
    pub fn new(method: AnalyticMethod, observations: Vec<VariantObservation>) -> Result<Self> {
        validate_observations(method, &observations)?;
        Ok(Self {
            method,
            observations,
            result: None,
        })
    }

    pub fn method(&self) -> AnalyticMethod {
        self.method
    }

    pub fn observations(&self) -> &[VariantObservation] {
        &self.observations
    }

    pub fn is_calculated(&self) -> bool {
        self.result.is_some()
    }

    /// Run the engine and keep the result for later reads.
    pub fn calculate(
        &mut self,
        engine: &BayesianEngine,
        conversion_prior: ConversionPrior,
    ) -> Result<&EvaluationResult> {
        let result = engine.evaluate(&self.observations, conversion_prior, self.method)?;
        Ok(self.result.insert(result))
    }

    pub fn result(&self) -> Result<&EvaluationResult> {
        self.result.as_ref().ok_or_else(|| {
            Error::UninitializedState("experiment has not been calculated yet".to_string())
        })
    }

    /// Model description for the last calculation.
    pub fn describe(&self) -> Result<String> {
        Ok(self.result()?.describe())
    }

    /// Variant whose probability to be best strictly exceeds `threshold`.
    pub fn leader(&self, threshold: f64) -> Result<Option<VariantId>> {
        Ok(self
            .result()?
            .probabilities
            .leader(threshold)
            .map(|row| row.variant.clone()))
    }

    /// Input table joined with probabilities; never-winners get 0.
    pub fn summary(&self) -> Result<Vec<SummaryRow>> {
        let result = self.result()?;
        let numeric = self.method.is_numeric();
        Ok(self
            .observations
            .iter()
            .map(|obs| SummaryRow {
                variant: obs.variant.clone(),
                sample_size: obs.sample_size,
                conversions: obs.conversions,
                sum_numeric: if numeric { obs.sum_numeric } else { None },
                conversion_rate: obs.conversion_rate(),
                avg_numeric_metric: if numeric {
                    obs.avg_numeric_metric().map(|v| round_to(v, 4))
                } else {
                    None
                },
                probability_to_be_best: result.probability_to_be_best(obs.variant.as_str()),
            })
            .collect())
    }
}
