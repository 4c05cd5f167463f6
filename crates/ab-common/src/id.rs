//! Variant and run identity types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of a variant, unique within one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VariantId(pub String);

impl VariantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default label used by the input form: `variant <n>` (1-based).
    pub fn nth(index: usize) -> Self {
        VariantId(format!("variant {}", index + 1))
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VariantId {
    fn from(s: &str) -> Self {
        VariantId(s.to_string())
    }
}

impl From<String> for VariantId {
    fn from(s: String) -> Self {
        VariantId(s)
    }
}

impl AsRef<str> for VariantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Run ID stamped on every JSON result.
///
/// Format: `run-<date>-<time>-<random>`
/// Example: `run-20260115-143022-abc123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new run ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let random: String = uuid::Uuid::new_v4()
            .to_string()
            .chars()
            .take(6)
            .collect();
        RunId(format!("run-{}-{}", now.format("%Y%m%d-%H%M%S"), random))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
