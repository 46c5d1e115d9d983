//! Model selection from TOML (`[models]` section)

use judge_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model selection per evaluator kind
///
/// # Example
///
/// ```toml
/// [models]
/// rubric = "gemini-2.0-flash"      # Repository rubrics (text)
/// video = "gemini-2.0-flash-exp"   # Presentation video (multimodal)
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for rubric evaluators
    pub rubric: Option<String>,
    /// Model for the video evaluator
    pub video: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            Some(s) => {
                // Model::from_str is infallible; unknown names become Custom(...)
                let Ok(model) = s.trim().parse::<Model>();
                (Some(model), Vec::new())
            }
        }
    }

    /// Rubric model, falling back to the default text model
    pub fn parse_rubric(&self) -> (Model, Vec<ConfigIssue>) {
        let (model, issues) = Self::parse_single_model("rubric", self.rubric.as_ref());
        (model.unwrap_or_default(), issues)
    }

    /// Video model, falling back to the default multimodal model
    pub fn parse_video(&self) -> (Model, Vec<ConfigIssue>) {
        let (model, mut issues) = Self::parse_single_model("video", self.video.as_ref());
        let model = model.unwrap_or_else(Model::default_video);
        if !model.accepts_video() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: "models.video".to_string(),
                    value: model.to_string(),
                    valid_values: vec![Model::default_video().to_string()],
                },
                format!("models.video: '{}' may not accept video input", model),
            ));
        }
        (model, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_config_defaults() {
        let config = FileModelsConfig::default();
        assert_eq!(config.parse_rubric().0, Model::Gemini20Flash);
        assert_eq!(config.parse_video().0, Model::Gemini20FlashExp);
        assert!(config.parse_rubric().1.is_empty());
        assert!(config.parse_video().1.is_empty());
    }

    #[test]
    fn test_models_config_deserialize() {
        let toml_str = r#"
[models]
rubric = "gemini-2.5-pro"
video = "gemini-2.5-flash"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.models.parse_rubric().0, Model::Gemini25Pro);
        assert_eq!(config.models.parse_video().0, Model::Gemini25Flash);
    }

    #[test]
    fn test_unknown_model_becomes_custom() {
        let config = FileModelsConfig {
            rubric: Some("my-tuned-model".to_string()),
            video: None,
        };
        assert_eq!(
            config.parse_rubric().0,
            Model::Custom("my-tuned-model".to_string())
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let config = FileModelsConfig {
            rubric: Some("  ".to_string()),
            video: None,
        };
        let (model, issues) = config.parse_rubric();
        assert_eq!(model, Model::default());
        assert!(issues.iter().any(|i| i.is_error()
            && matches!(
                &i.code,
                ConfigIssueCode::EmptyModelName { field } if field == "rubric"
            )));
    }
}
