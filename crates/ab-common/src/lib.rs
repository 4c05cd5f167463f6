//! Bayesian A/B common types, IDs, and errors.
//!
//! This crate provides foundational types shared across ab-core modules:
//! - Variant and run identity types
//! - Schema versioning for JSON output
//! - Common error types with stable codes
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use id::{RunId, VariantId};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
