//! Video evaluation configuration from TOML (`[video]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVideoConfig {
    /// Evaluate submitted videos at all
    pub enabled: bool,
    /// Downloader binary, resolved on PATH
    pub downloader: String,
    /// Downloader format selector
    pub format: String,
    /// Largest payload sent inline to the model
    pub max_bytes: u64,
}

impl Default for FileVideoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            downloader: "yt-dlp".to_string(),
            format: "best[ext=mp4]/best".to_string(),
            max_bytes: 20 * 1024 * 1024,
        }
    }
}
