//! Rounding and percentage helpers.

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Convert counts into percentages of `total`, rounded to `decimals`.
///
/// A zero total yields all zeros rather than NaN.
pub fn percentages(counts: &[u64], total: u64, decimals: u32) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|&c| round_to(c as f64 / total as f64 * 100.0, decimals))
        .collect()
}
