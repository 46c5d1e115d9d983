//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// Rubric evaluation runs on a text model; the optional presentation
/// analysis needs a multimodal one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini20Flash,
    Gemini20FlashExp,
    Gemini25Flash,
    Gemini25Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashExp => "gemini-2.0-flash-exp",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// Default model for video presentation analysis
    pub fn default_video() -> Model {
        Model::Gemini20FlashExp
    }

    /// Check if this model accepts inline video parts
    pub fn accepts_video(&self) -> bool {
        !matches!(self, Model::Custom(_))
    }
}

impl Default for Model {
    /// Returns the default rubric model (gemini-2.0-flash)
    fn default() -> Self {
        Model::Gemini20Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.0-flash-exp" => Model::Gemini20FlashExp,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [
            Model::Gemini20Flash,
            Model::Gemini20FlashExp,
            Model::Gemini25Flash,
            Model::Gemini25Pro,
        ] {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
        assert!(!model.accepts_video());
    }

    #[test]
    fn test_model_defaults() {
        assert_eq!(Model::default(), Model::Gemini20Flash);
        assert_eq!(Model::default_video(), Model::Gemini20FlashExp);
        assert!(Model::default_video().accepts_video());
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::Gemini25Pro).unwrap();
        assert_eq!(json, "\"gemini-2.5-pro\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::Gemini25Pro);
    }
}
