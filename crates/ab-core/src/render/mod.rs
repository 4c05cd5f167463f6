//! Rendering helpers for hosts that display results.

pub mod plot;
pub mod table;

pub use plot::{density_histogram, AxisLimits, DensitySeries};
pub use table::{render_probability_bars, render_summary_table};
