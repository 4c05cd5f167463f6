//! Inference engine modules.

pub mod best;
pub mod sampler;
pub mod simulation;

pub use best::{estimate_best, ProbabilityRow, ProbabilityTable};
pub use sampler::{sample_posteriors, Posterior};
pub use simulation::{SimulationColumn, SimulationMatrix};
