//! Simulation matrix: one column of posterior draws per variant.

use ab_common::{Error, Result, VariantId};
use ab_math::SampleSummary;
use serde::{Deserialize, Serialize};

/// Posterior draws for a single variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationColumn {
    pub variant: VariantId,
    pub samples: Vec<f64>,
}

/// Column-major matrix of joint posterior draws.
///
/// Row `i` across all columns is one joint simulation; columns keep the
/// order in which variants were supplied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationMatrix {
    rows: usize,
    columns: Vec<SimulationColumn>,
}

impl SimulationMatrix {
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    /// Append a column. Its length must equal the matrix row count.
    pub fn push_column(&mut self, variant: VariantId, samples: Vec<f64>) -> Result<()> {
        if samples.len() != self.rows {
            return Err(Error::Sampling(format!(
                "column '{}' has {} draws, expected {}",
                variant,
                samples.len(),
                self.rows
            )));
        }
        self.columns.push(SimulationColumn { variant, samples });
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[SimulationColumn] {
        &self.columns
    }

    pub fn variants(&self) -> impl Iterator<Item = &VariantId> {
        self.columns.iter().map(|c| &c.variant)
    }

    pub fn column(&self, variant: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.variant.as_str() == variant)
            .map(|c| c.samples.as_slice())
    }

    /// Per-variant posterior summary, in column order.
    pub fn summaries(&self) -> Vec<(VariantId, Option<SampleSummary>)> {
        self.columns
            .iter()
            .map(|c| (c.variant.clone(), SampleSummary::from_samples(&c.samples)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_lookup() {
        let mut m = SimulationMatrix::with_rows(3);
        m.push_column("A".into(), vec![0.1, 0.2, 0.3]).unwrap();
        m.push_column("B".into(), vec![0.3, 0.2, 0.1]).unwrap();
        assert_eq!(m.n_columns(), 2);
        assert_eq!(m.column("B"), Some(&[0.3, 0.2, 0.1][..]));
        assert_eq!(m.column("C"), None);
        let names: Vec<&str> = m.variants().map(|v| v.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn rejects_ragged_columns() {
        let mut m = SimulationMatrix::with_rows(2);
        let err = m.push_column("A".into(), vec![0.5]).unwrap_err();
        assert_eq!(err.code(), 31);
        assert!(m.is_empty());
    }
}
