//! Configuration file loading for hackathon-judge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `JUDGE_*` (nested with `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./judge.toml` or `./.judge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/hackathon-judge/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;

pub use file_config::{
    FileConfig, FileEvaluationConfig, FileGeminiConfig, FileGitHubConfig, FileLeaderboardConfig,
    FileLoggingConfig, FileModelsConfig, FileProvidersConfig, FileRubricConfig, FileServerConfig,
    FileVideoConfig,
};
pub use loader::ConfigLoader;
