//! Infrastructure layer for hackathon-judge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod github;
pub mod leaderboard;
pub mod logging;
pub mod providers;
pub mod video;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileEvaluationConfig, FileGeminiConfig, FileGitHubConfig,
    FileLeaderboardConfig, FileLoggingConfig, FileModelsConfig, FileServerConfig,
    FileVideoConfig,
};
pub use github::{GitHubContentFetcher, GitHubFetcherConfig};
pub use leaderboard::CsvLeaderboard;
pub use logging::JsonlEvaluationLogger;
pub use providers::gemini::{GeminiClient, GeminiConfig, GeminiLlmGateway};
pub use video::{GeminiVideoEvaluator, VideoDownloader, YtDlpDownloader};
