//! Plot data for posterior distribution charts.
//!
//! Axis limits are computed over every column of the simulation matrix so
//! that all variants share one x-axis.

use ab_common::VariantId;
use serde::{Deserialize, Serialize};

use crate::inference::SimulationMatrix;

/// Shared x-axis range for distribution plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

impl AxisLimits {
    /// Global min/max over all finite samples, widened by `padding` on each
    /// side. `None` when the matrix holds no finite values.
    pub fn from_matrix(matrix: &SimulationMatrix, padding: f64) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for col in matrix.columns() {
            for &v in col.samples.iter().filter(|v| v.is_finite()) {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            return None;
        }
        Some(Self {
            min: min - padding,
            max: max + padding,
        })
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Histogram density estimate of one variant over the shared axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensitySeries {
    pub variant: VariantId,
    pub bin_centers: Vec<f64>,
    pub density: Vec<f64>,
}

impl DensitySeries {
    /// One series per matrix column, all on the same axis.
    pub fn from_matrix(matrix: &SimulationMatrix, limits: AxisLimits, bins: usize) -> Vec<Self> {
        let width = if bins == 0 { 0.0 } else { limits.width() / bins as f64 };
        let bin_centers: Vec<f64> = (0..bins)
            .map(|i| limits.min + width * (i as f64 + 0.5))
            .collect();
        matrix
            .columns()
            .iter()
            .map(|col| DensitySeries {
                variant: col.variant.clone(),
                bin_centers: bin_centers.clone(),
                density: density_histogram(&col.samples, limits, bins),
            })
            .collect()
    }
}

/// Normalised histogram: `sum(density) * bin_width == 1` over in-range samples.
///
/// Samples outside `limits` or non-finite are dropped. A degenerate axis
/// (zero width) puts all mass in the first bin.
pub fn density_histogram(samples: &[f64], limits: AxisLimits, bins: usize) -> Vec<f64> {
    let mut counts = vec![0u64; bins];
    if bins == 0 {
        return Vec::new();
    }
    let width = limits.width() / bins as f64;
    let mut kept = 0u64;
    for &v in samples {
        if !v.is_finite() || v < limits.min || v > limits.max {
            continue;
        }
        let idx = if width > 0.0 {
            (((v - limits.min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
        kept += 1;
    }
    if kept == 0 {
        return vec![0.0; bins];
    }
    let norm = if width > 0.0 { kept as f64 * width } else { kept as f64 };
    counts.iter().map(|&c| c as f64 / norm).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> SimulationMatrix {
        let mut m = SimulationMatrix::with_rows(4);
        m.push_column("A".into(), vec![0.10, 0.12, 0.11, 0.13]).unwrap();
        m.push_column("B".into(), vec![0.30, 0.25, f64::INFINITY, 0.28]).unwrap();
        m
    }

    #[test]
    fn limits_span_every_column() {
        let limits = AxisLimits::from_matrix(&matrix(), 0.05).unwrap();
        assert!((limits.min - 0.05).abs() < 1e-12);
        assert!((limits.max - 0.35).abs() < 1e-12);
    }

    #[test]
    fn limits_none_for_empty_matrix() {
        assert!(AxisLimits::from_matrix(&SimulationMatrix::with_rows(3), 0.0).is_none());
    }

    #[test]
    fn histogram_integrates_to_one() {
        let limits = AxisLimits { min: 0.0, max: 1.0 };
        let samples: Vec<f64> = (0..1000).map(|i| i as f64 / 1000.0).collect();
        let density = density_histogram(&samples, limits, 10);
        let area: f64 = density.iter().map(|d| d * 0.1).sum();
        assert!((area - 1.0).abs() < 1e-9);
        assert!(density.iter().all(|&d| (d - 1.0).abs() < 0.05));
    }

    #[test]
    fn histogram_includes_upper_edge() {
        let limits = AxisLimits { min: 0.0, max: 1.0 };
        let density = density_histogram(&[1.0], limits, 4);
        assert_eq!(density[3], 4.0);
    }

    #[test]
    fn series_share_bin_centers() {
        let m = matrix();
        let limits = AxisLimits::from_matrix(&m, 0.0).unwrap();
        let series = DensitySeries::from_matrix(&m, limits, 5);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bin_centers, series[1].bin_centers);
        assert_eq!(series[1].density.len(), 5);
    }
}
