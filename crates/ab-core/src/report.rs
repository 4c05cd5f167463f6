//! JSON report envelope for a calculated experiment.

use ab_common::{Result, RunId, VariantId, SCHEMA_VERSION};
use ab_math::SampleSummary;
use serde::Serialize;

use crate::experiment::{Experiment, SummaryRow};
use crate::inference::{ProbabilityTable, SimulationMatrix};
use crate::model::{AnalyticMethod, ModelPriors};
use crate::render::{AxisLimits, DensitySeries};

/// Padding applied on both sides of the shared plot axis.
pub const AXIS_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Serialize)]
pub struct PosteriorReport {
    pub variant: VariantId,
    #[serde(flatten)]
    pub summary: Option<SampleSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotReport {
    pub axis: AxisLimits,
    pub series: Vec<DensitySeries>,
}

/// Everything a renderer needs, as one serialisable document.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub schema_version: &'static str,
    pub run_id: RunId,
    pub generated_at: String,
    pub model: AnalyticMethod,
    pub priors: ModelPriors,
    pub simulation_size: usize,
    pub seed: u64,
    pub significance_threshold: f64,
    pub leader: Option<VariantId>,
    /// Winners only, highest first.
    pub probabilities: ProbabilityTable,
    pub summary: Vec<SummaryRow>,
    pub description: String,
    pub posteriors: Vec<PosteriorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulations: Option<SimulationMatrix>,
}

impl EvaluationReport {
    /// Build from a calculated experiment.
    ///
    /// `bins == 0` skips the density plot data; `include_samples` embeds the
    /// raw simulation matrix.
    pub fn build(
        experiment: &Experiment,
        significance_threshold: f64,
        bins: usize,
        include_samples: bool,
    ) -> Result<Self> {
        let result = experiment.result()?;

        let plot = if bins > 0 {
            AxisLimits::from_matrix(&result.simulations, AXIS_PADDING).map(|axis| PlotReport {
                axis,
                series: DensitySeries::from_matrix(&result.simulations, axis, bins),
            })
        } else {
            None
        };

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            run_id: RunId::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            model: result.method,
            priors: result.priors,
            simulation_size: result.simulation_size,
            seed: result.seed,
            significance_threshold,
            leader: experiment.leader(significance_threshold)?,
            probabilities: result.probabilities.clone(),
            summary: experiment.summary()?,
            description: result.describe(),
            posteriors: result
                .posterior_summaries()
                .into_iter()
                .map(|(variant, summary)| PosteriorReport { variant, summary })
                .collect(),
            plot,
            simulations: include_samples.then(|| result.simulations.clone()),
        })
    }
}
