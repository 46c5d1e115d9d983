//! HTTP client for the Gemini Generative Language API.

use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    convert_status_error, convert_transport_error,
};
use crate::config::FileGeminiConfig;
use judge_application::GatewayError;
use judge_domain::Model;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Resolve credentials from the `[providers.gemini]` section.
    pub fn from_file(file: &FileGeminiConfig) -> Result<Self, GatewayError> {
        let api_key = file.resolve_api_key().ok_or_else(|| {
            GatewayError::AuthenticationFailed(format!(
                "no API key: set {} or providers.gemini.api_key",
                file.api_key_env
            ))
        })?;
        Ok(Self {
            api_key,
            base_url: file.base_url.trim_end_matches('/').to_string(),
            temperature: file.temperature,
            timeout_secs: file.timeout_seconds,
        })
    }
}

/// Stateless `generateContent` caller shared by text sessions and the video evaluator.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Single-turn generation. Returns the first candidate's text.
    pub async fn generate(
        &self,
        model: &Model,
        system_prompt: Option<&str>,
        parts: Vec<Part>,
    ) -> Result<String, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url,
            model.as_str()
        );
        let request = GenerateContentRequest {
            system_instruction: system_prompt
                .filter(|p| !p.is_empty())
                .map(|p| Content {
                    role: None,
                    parts: vec![Part::text(p)],
                }),
            contents: vec![Content {
                role: Some("user"),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };

        debug!(model = %model, "Calling Gemini generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| convert_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(convert_status_error(status, &body));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid response: {}", e)))?
            .into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            temperature: 0.0,
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_sends_key_temperature_and_system_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "be strict"}]},
                "contents": [{"role": "user", "parts": [{"text": "score this"}]}],
                "generationConfig": {"temperature": 0.0}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("{\"score\":1}")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server.uri())
            .generate(
                &Model::Gemini20Flash,
                Some("be strict"),
                vec![Part::text("score this")],
            )
            .await
            .unwrap();

        assert_eq!(text, "{\"score\":1}");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .generate(&Model::Gemini20Flash, None, vec![Part::text("x")])
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::RateLimited("Quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_model_maps_to_model_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/no-such-model:generateContent"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .generate(
                &Model::Custom("no-such-model".to_string()),
                None,
                vec![Part::text("x")],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::ModelNotAvailable(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_error() {
        let err = client("http://127.0.0.1:1")
            .generate(&Model::Gemini20Flash, None, vec![Part::text("x")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }

    #[test]
    fn test_config_requires_api_key() {
        let file = FileGeminiConfig {
            api_key: None,
            api_key_env: "JUDGE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            GeminiConfig::from_file(&file),
            Err(GatewayError::AuthenticationFailed(_))
        ));

        let file = FileGeminiConfig {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:9/".to_string(),
            ..Default::default()
        };
        let config = GeminiConfig::from_file(&file).unwrap();
        assert_eq!(config.base_url, "http://localhost:9");
        assert_eq!(config.api_key, "k");
    }
}
