//! Bayesian A/B configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for conjugate prior hyperparameters
//! - Engine settings (simulation size, seed, significance threshold)
//! - Config resolution (CLI → env → file → XDG → defaults)
//! - Semantic validation

pub mod engine;
pub mod priors;
pub mod resolve;
pub mod validate;

pub use engine::EngineConfig;
pub use priors::{BetaParams, ConversionPrior, GammaParams};
pub use resolve::{resolve_config, ConfigOverrides, ConfigPaths};
pub use validate::{ValidationError, ValidationResult};
