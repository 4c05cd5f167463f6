//! Output format selection shared by the CLI and renderers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable tables and bar chart.
    #[default]
    Summary,
    /// Single JSON document (logs go to stderr as JSON too).
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
