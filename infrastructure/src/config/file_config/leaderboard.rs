//! Leaderboard log configuration from TOML (`[leaderboard]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLeaderboardConfig {
    /// Record every evaluation
    pub enabled: bool,
    /// CSV file, created with a header on first write
    pub path: PathBuf,
}

impl Default for FileLeaderboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("evaluation_results.csv"),
        }
    }
}
