//! Per-variant observations and boundary validation.
//!
//! Observations arrive from an input form or file as loosely typed records
//! ([`ObservationRecord`]) and are converted into [`VariantObservation`]s,
//! which are validated as a group before any sampling happens.

use std::collections::HashSet;

use ab_common::{Error, Result, VariantId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::AnalyticMethod;

/// One row of experiment data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantObservation {
    pub variant: VariantId,
    /// Trials or units observed. At least 1.
    pub sample_size: u64,
    /// Successes (conversion) or event count (numeric models).
    pub conversions: u64,
    /// Aggregate metric total; numeric models only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum_numeric: Option<f64>,
}

impl VariantObservation {
    pub fn conversion(variant: impl Into<VariantId>, sample_size: u64, conversions: u64) -> Self {
        Self {
            variant: variant.into(),
            sample_size,
            conversions,
            sum_numeric: None,
        }
    }

    pub fn numeric(
        variant: impl Into<VariantId>,
        sample_size: u64,
        conversions: u64,
        sum_numeric: f64,
    ) -> Self {
        Self {
            variant: variant.into(),
            sample_size,
            conversions,
            sum_numeric: Some(sum_numeric),
        }
    }

    /// `sample_size - conversions`, saturating at zero.
    pub fn failures(&self) -> u64 {
        self.sample_size.saturating_sub(self.conversions)
    }

    pub fn conversion_rate(&self) -> f64 {
        if self.sample_size == 0 {
            return 0.0;
        }
        self.conversions as f64 / self.sample_size as f64
    }

    /// Mean metric per conversion; `None` without a total or conversions.
    pub fn avg_numeric_metric(&self) -> Option<f64> {
        let sum = self.sum_numeric?;
        if self.conversions == 0 {
            return None;
        }
        Some(sum / self.conversions as f64)
    }

    fn check(&self, method: AnalyticMethod) -> Result<()> {
        let label = self.variant.as_str();
        if label.trim().is_empty() {
            return Err(Error::invalid_observation(label, "variant label must not be empty"));
        }
        if self.sample_size == 0 {
            return Err(Error::invalid_observation(label, "sample_size must be at least 1"));
        }
        match method {
            AnalyticMethod::Conversion => {
                if self.conversions > self.sample_size {
                    return Err(Error::invalid_observation(
                        label,
                        format!(
                            "conversions ({}) exceed sample_size ({})",
                            self.conversions, self.sample_size
                        ),
                    ));
                }
            }
            AnalyticMethod::NumericContinuous | AnalyticMethod::NumericDiscrete => {
                match self.sum_numeric {
                    None => {
                        return Err(Error::invalid_observation(
                            label,
                            format!("sum_numeric is required for the {method} model"),
                        ))
                    }
                    Some(sum) if !sum.is_finite() || sum < 0.0 => {
                        return Err(Error::invalid_observation(
                            label,
                            format!("sum_numeric must be a finite non-negative number, got {sum}"),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

/// Validate a full set of observations for one evaluation.
///
/// Fails on an empty set, duplicate labels, zero sample sizes, and for
/// numeric models on missing totals or totals that are zero for every
/// variant.
pub fn validate_observations(
    method: AnalyticMethod,
    observations: &[VariantObservation],
) -> Result<()> {
    if observations.is_empty() {
        return Err(Error::invalid_observation(
            "<none>",
            "at least one variant is required",
        ));
    }

    let mut seen = HashSet::with_capacity(observations.len());
    for obs in observations {
        obs.check(method)?;
        if !seen.insert(obs.variant.as_str()) {
            return Err(Error::invalid_observation(
                obs.variant.as_str(),
                "duplicate variant label",
            ));
        }
    }

    if method.is_numeric()
        && observations
            .iter()
            .all(|o| o.sum_numeric.unwrap_or(0.0) == 0.0)
    {
        return Err(Error::invalid_observation(
            "<all>",
            "numeric totals are zero for every variant; please input non-zero numeric metrics",
        ));
    }

    Ok(())
}

/// Loosely typed input row as it appears in files and on the command line.
///
/// Signed fields let negative counts reach validation and be reported as
/// invalid observations rather than parse failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObservationRecord {
    pub variant: String,
    pub sample_size: i64,
    pub conversions: i64,
    #[serde(default)]
    pub sum_numeric: Option<f64>,
}

impl TryFrom<ObservationRecord> for VariantObservation {
    type Error = Error;

    fn try_from(record: ObservationRecord) -> Result<Self> {
        let sample_size = u64::try_from(record.sample_size).map_err(|_| {
            Error::invalid_observation(
                &record.variant,
                format!("sample_size must be positive, got {}", record.sample_size),
            )
        })?;
        let conversions = u64::try_from(record.conversions).map_err(|_| {
            Error::invalid_observation(
                &record.variant,
                format!("conversions must be non-negative, got {}", record.conversions),
            )
        })?;
        Ok(VariantObservation {
            variant: VariantId(record.variant),
            sample_size,
            conversions,
            sum_numeric: record.sum_numeric,
        })
    }
}

/// Parse a `LABEL:SAMPLE_SIZE:CONVERSIONS[:SUM_NUMERIC]` specification.
pub fn parse_variant_spec(spec: &str) -> Result<ObservationRecord> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(Error::invalid_observation(
            parts.first().copied().unwrap_or(spec),
            format!("expected LABEL:SAMPLE_SIZE:CONVERSIONS[:SUM_NUMERIC], got '{spec}'"),
        ));
    }
    let label = parts[0];
    let int_field = |name: &str, raw: &str| -> Result<i64> {
        raw.parse::<i64>().map_err(|_| {
            Error::invalid_observation(label, format!("{name} is not an integer: '{raw}'"))
        })
    };
    let sample_size = int_field("sample_size", parts[1])?;
    let conversions = int_field("conversions", parts[2])?;
    let sum_numeric = match parts.get(3) {
        Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
            Error::invalid_observation(label, format!("sum_numeric is not a number: '{raw}'"))
        })?),
        None => None,
    };
    Ok(ObservationRecord {
        variant: label.to_string(),
        sample_size,
        conversions,
        sum_numeric,
    })
}
