//! Bayesian A/B/N evaluation engine.
//!
//! Given per-variant summary statistics, builds a conjugate posterior per
//! variant, draws Monte Carlo samples from each, and estimates the
//! probability that each variant is the best.
//!
//! - [`model`]: closed set of analytic methods and their resolved priors
//! - [`observation`]: per-variant input rows and boundary validation
//! - [`inference`]: posterior sampler, simulation matrix, best-variant estimator
//! - [`engine`]: seeded evaluation entry point returning an [`EvaluationResult`]
//! - [`describe`]: explanatory text for a result
//! - [`experiment`]: calculator-style facade (leader, joined summary table)
//! - [`render`]: plotting data and text tables for hosts

pub mod cli;
pub mod describe;
pub mod engine;
pub mod exit_codes;
pub mod experiment;
pub mod inference;
pub mod logging;
pub mod model;
pub mod observation;
pub mod render;
pub mod report;

pub use ab_common::{Error, Result, VariantId};
pub use engine::{BayesianEngine, EvaluationResult};
pub use experiment::{Experiment, SummaryRow};
pub use inference::{ProbabilityRow, ProbabilityTable, SimulationMatrix};
pub use model::{AnalyticMethod, ModelPriors};
pub use observation::VariantObservation;
