use judge_domain::ConfigIssue;
use thiserror::Error;

/// Fatal configuration problems, reported before any command runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigIssue>),
}

impl ConfigError {
    /// Every issue found, warnings included.
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            ConfigError::Invalid(issues) => issues,
            ConfigError::Load(_) => &[],
        }
    }
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
