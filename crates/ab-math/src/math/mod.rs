//! Core math modules.

pub mod argmax;
pub mod rounding;
pub mod summary;
