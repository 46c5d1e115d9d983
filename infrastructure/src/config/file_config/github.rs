//! GitHub content fetching from TOML (`[github]` section)

use serde::{Deserialize, Serialize};

/// GitHub content fetcher configuration
///
/// # Example
///
/// ```toml
/// [github]
/// branch = "main"
/// extensions = [".py", ".rs", ".md"]
/// max_content_bytes = 400000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGitHubConfig {
    /// REST API base URL
    pub api_base_url: String,
    /// Branch whose tree is listed; falls back to the default branch on 404
    pub branch: String,
    /// File extensions included in the content blob
    pub extensions: Vec<String>,
    /// Environment variable holding a personal access token
    pub token_env: String,
    /// Direct token (not recommended; prefer the env var)
    pub token: Option<String>,
    /// Optional cap on the assembled content (unbounded when unset)
    pub max_content_bytes: Option<usize>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileGitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            branch: "main".to_string(),
            extensions: [".py", ".ipynb", ".md", ".json", ".yaml", ".yml", ".txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            token_env: "GITHUB_TOKEN".to_string(),
            token: None,
            max_content_bytes: None,
            timeout_seconds: 30,
        }
    }
}

impl FileGitHubConfig {
    /// Explicit token first, then the configured environment variable.
    /// Public repositories work without one.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(&self.token_env)
                    .ok()
                    .filter(|t| !t.trim().is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let config = FileGitHubConfig::default();
        assert_eq!(config.extensions.len(), 7);
        assert!(config.extensions.contains(&".ipynb".to_string()));
        assert_eq!(config.branch, "main");
        assert!(config.max_content_bytes.is_none());
    }

    #[test]
    fn test_github_deserialize() {
        let toml_str = r#"
[github]
branch = "develop"
extensions = [".rs"]
max_content_bytes = 1024
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.branch, "develop");
        assert_eq!(config.github.extensions, vec![".rs".to_string()]);
        assert_eq!(config.github.max_content_bytes, Some(1024));
        assert_eq!(config.github.token_env, "GITHUB_TOKEN");
    }
}
