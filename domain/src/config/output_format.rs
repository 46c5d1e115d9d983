//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for evaluation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable scorecard (default)
    #[default]
    Text,
    /// The report as JSON, same shape as the HTTP API
    Json,
}
