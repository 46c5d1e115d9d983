//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod evaluation;
mod github;
mod leaderboard;
mod logging;
mod models;
mod providers;
mod server;
mod video;

pub use evaluation::{FileEvaluationConfig, FileRubricConfig};
pub use github::FileGitHubConfig;
pub use leaderboard::FileLeaderboardConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use providers::{FileGeminiConfig, FileProvidersConfig};
pub use server::FileServerConfig;
pub use video::FileVideoConfig;

use super::error::ConfigError;
use judge_application::EvaluationConfig;
use judge_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model selection per evaluator kind
    pub models: FileModelsConfig,
    /// Provider settings (credentials, endpoints)
    pub providers: FileProvidersConfig,
    /// Repository content fetching
    pub github: FileGitHubConfig,
    /// Orchestrator settings and rubric overrides
    pub evaluation: FileEvaluationConfig,
    /// Presentation video analysis
    pub video: FileVideoConfig,
    /// HTTP API
    pub server: FileServerConfig,
    /// CSV leaderboard log
    pub leaderboard: FileLeaderboardConfig,
    /// Structured evaluation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This checks structure only; credentials are checked separately by
    /// [`credential_issues`](Self::credential_issues) because only commands
    /// that call the model need them.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Model names
        issues.extend(self.models.parse_rubric().1);
        if self.video.enabled {
            issues.extend(self.models.parse_video().1);
        }

        // 2. Enum values and rubric overrides
        issues.extend(self.evaluation.parse_mode().1);
        issues.extend(self.evaluation.parse_fetch_failure().1);
        issues.extend(self.evaluation.parse_rubrics().1);

        // 3. Numeric ranges
        if self.github.max_content_bytes == Some(0) {
            issues.push(out_of_range(
                "github.max_content_bytes",
                "github.max_content_bytes: must be positive (omit it for no limit)",
            ));
        }
        if self.video.enabled && self.video.max_bytes == 0 {
            issues.push(out_of_range(
                "video.max_bytes",
                "video.max_bytes: must be positive",
            ));
        }
        let temperature = self.providers.gemini.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "providers.gemini.temperature".to_string(),
                },
                format!(
                    "providers.gemini.temperature: {} is outside 0.0..=2.0",
                    temperature
                ),
            ));
        }

        // 4. Fetch scope
        if self.github.extensions.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "github.extensions".to_string(),
                },
                "github.extensions is empty: only the README will be evaluated",
            ));
        }

        issues
    }

    /// Issues for credentials that evaluation cannot run without.
    pub fn credential_issues(&self) -> Vec<ConfigIssue> {
        let gemini = &self.providers.gemini;
        if gemini.resolve_api_key().is_some() {
            return Vec::new();
        }
        vec![ConfigIssue::error(
            ConfigIssueCode::MissingCredential {
                field: "providers.gemini.api_key".to_string(),
            },
            format!(
                "Gemini API key not found: set {} or providers.gemini.api_key",
                gemini.api_key_env
            ),
        )]
    }

    /// Run [`validate`](Self::validate), plus
    /// [`credential_issues`](Self::credential_issues) when `require_credentials`.
    ///
    /// Returns the warnings when nothing is fatal.
    pub fn ensure_valid(&self, require_credentials: bool) -> Result<Vec<ConfigIssue>, ConfigError> {
        let mut issues = self.validate();
        if require_credentials {
            issues.extend(self.credential_issues());
        }
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigError::Invalid(issues));
        }
        Ok(issues)
    }

    /// Build orchestrator parameters. Invalid values fall back to defaults;
    /// [`validate`](Self::validate) reports them.
    pub fn to_evaluation_config(&self) -> EvaluationConfig {
        EvaluationConfig::default()
            .with_model(self.models.parse_rubric().0)
            .with_rubrics(self.evaluation.parse_rubrics().0)
            .with_pacing(self.evaluation.pacing())
            .with_evaluator_timeout(self.evaluation.evaluator_timeout())
            .with_mode(self.evaluation.parse_mode().0)
            .with_fetch_failure_policy(self.evaluation.parse_fetch_failure().0)
    }
}

fn out_of_range(field: &str, message: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        message,
    )
}
