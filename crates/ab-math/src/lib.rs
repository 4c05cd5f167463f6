//! Bayesian A/B math utilities.

pub mod math;

pub use math::argmax::*;
pub use math::rounding::*;
pub use math::summary::*;
