//! Structured log configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL evaluation log (prompts, raw responses, reports); disabled when unset
    pub evaluation_log: Option<PathBuf>,
}
