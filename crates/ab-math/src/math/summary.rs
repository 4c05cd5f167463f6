//! Summary statistics over posterior sample vectors.
//!
//! These helpers reduce a column of Monte Carlo draws to the numbers a
//! report needs: mean, spread, quantiles, and range. NaN inputs propagate
//! as NaN so that a corrupt column is never silently summarised.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased sample variance. NaN with fewer than two samples.
pub fn variance(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    let m = mean(samples);
    let ss: f64 = samples.iter().map(|x| (x - m) * (x - m)).sum();
    ss / (samples.len() - 1) as f64
}

/// Minimum and maximum, or `None` for an empty slice or any NaN.
pub fn min_max(samples: &[f64]) -> Option<(f64, f64)> {
    if samples.is_empty() || samples.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in samples {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    Some((lo, hi))
}

/// Linear-interpolated quantile of already sorted data, `q` in [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() || q.is_nan() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi || sorted[lo] == sorted[hi] {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Central credible interval `[(1-mass)/2, (1+mass)/2]` of the samples.
pub fn credible_interval(samples: &[f64], mass: f64) -> Option<(f64, f64)> {
    if samples.is_empty() || samples.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let tail = (1.0 - mass.clamp(0.0, 1.0)) / 2.0;
    Some((
        quantile_sorted(&sorted, tail),
        quantile_sorted(&sorted, 1.0 - tail),
    ))
}

/// Compact description of one posterior sample column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSummary {
    /// Summarise with a 95% central credible interval.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let (min, max) = min_max(samples)?;
        let (ci_lower, ci_upper) = credible_interval(samples, 0.95)?;
        let var = variance(samples);
        Some(Self {
            mean: mean(samples),
            std_dev: if var.is_nan() { 0.0 } else { var.sqrt() },
            ci_lower,
            ci_upper,
            min,
            max,
        })
    }
}
