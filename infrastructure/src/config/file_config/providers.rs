//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Google Gemini API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Sampling temperature; 0 keeps scoring deterministic.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.0,
            timeout_seconds: 120,
        }
    }
}

impl FileGeminiConfig {
    /// Explicit key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Gemini API settings.
    pub gemini: FileGeminiConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let config = FileGeminiConfig {
            api_key: Some("inline-key".to_string()),
            api_key_env: "JUDGE_TEST_UNSET_GEMINI_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("inline-key"));
    }

    #[test]
    fn test_blank_key_and_missing_env_resolve_to_none() {
        let config = FileGeminiConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "JUDGE_TEST_UNSET_GEMINI_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_providers_deserialize() {
        let toml_str = r#"
[providers.gemini]
base_url = "http://localhost:9999"
temperature = 0.2
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.gemini.base_url, "http://localhost:9999");
        assert!((config.providers.gemini.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.providers.gemini.api_key_env, "GOOGLE_API_KEY");
    }
}
