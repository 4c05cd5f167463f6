//! Best-variant estimator.
//!
//! Reduces a simulation matrix to "probability to be best": for each joint
//! draw the variant with the largest sampled value wins the row (the first
//! column in input order wins ties), and win counts are converted into
//! percentages rounded to two decimals.

use ab_common::VariantId;
use ab_math::{count_row_maxima, percentages};
use serde::{Deserialize, Serialize};

use crate::inference::simulation::SimulationMatrix;

/// Decimal places kept on reported percentages.
pub const PROBABILITY_DECIMALS: u32 = 2;

/// One variant's share of won simulations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityRow {
    pub variant: VariantId,
    /// Percentage in [0, 100].
    pub probability_to_be_best: f64,
}

/// Probability-to-be-best table, highest probability first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityTable {
    rows: Vec<ProbabilityRow>,
}

impl ProbabilityTable {
    pub fn rows(&self) -> &[ProbabilityRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Probability for a variant, `None` if it never won a draw.
    pub fn get(&self, variant: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.variant.as_str() == variant)
            .map(|r| r.probability_to_be_best)
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.probability_to_be_best).sum()
    }

    /// Rejoin against the full variant list, in that list's order, filling
    /// variants that never won with 0.
    pub fn filled<'a, I>(&self, variants: I) -> ProbabilityTable
    where
        I: IntoIterator<Item = &'a VariantId>,
    {
        let rows = variants
            .into_iter()
            .map(|v| ProbabilityRow {
                variant: v.clone(),
                probability_to_be_best: self.get(v.as_str()).unwrap_or(0.0),
            })
            .collect();
        ProbabilityTable { rows }
    }

    /// Highest-ranked variant whose probability strictly exceeds `threshold`.
    pub fn leader(&self, threshold: f64) -> Option<&ProbabilityRow> {
        self.rows
            .iter()
            .filter(|r| r.probability_to_be_best > threshold)
            .max_by(|a, b| a.probability_to_be_best.total_cmp(&b.probability_to_be_best))
    }
}

/// Count row maxima and build the probability table.
///
/// Only variants that win at least one row are listed. Rows are sorted by
/// descending win count; equal counts keep input order.
pub fn estimate_best(matrix: &SimulationMatrix) -> ProbabilityTable {
    let columns: Vec<&[f64]> = matrix.columns().iter().map(|c| c.samples.as_slice()).collect();
    let counts = count_row_maxima(&columns);
    let total: u64 = counts.iter().sum();
    let pct = percentages(&counts, total, PROBABILITY_DECIMALS);

    let mut ranked: Vec<(u64, ProbabilityRow)> = matrix
        .columns()
        .iter()
        .zip(counts.iter().zip(pct))
        .filter(|(_, (&count, _))| count > 0)
        .map(|(col, (&count, p))| {
            (
                count,
                ProbabilityRow {
                    variant: col.variant.clone(),
                    probability_to_be_best: p,
                },
            )
        })
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ProbabilityTable {
        rows: ranked.into_iter().map(|(_, row)| row).collect(),
    }
}
