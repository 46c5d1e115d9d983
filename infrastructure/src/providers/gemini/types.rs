//! Wire types for the Gemini `generateContent` endpoint.

use judge_application::GatewayError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    pub parts: Vec<Part>,
}

/// One request part: text or an inline binary payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    /// Inline payload; `data` must already be base64-encoded.
    pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Part::InlineData(InlineData {
            mime_type: mime_type.into(),
            data,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn into_text(self) -> Result<String, GatewayError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GatewayError::RequestFailed(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)?;
        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return match finish_reason.as_deref() {
                Some(reason) if reason != "STOP" => Err(GatewayError::RequestFailed(format!(
                    "generation stopped: {}",
                    reason
                ))),
                _ => Err(GatewayError::EmptyResponse),
            };
        }
        Ok(text)
    }
}

/// Map a non-success HTTP status (and its error body) to a gateway error.
pub(crate) fn convert_status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(message),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(message),
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

/// Map a transport error to a gateway error.
pub(crate) fn convert_transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_serialize_in_api_shape() {
        let text = serde_json::to_value(Part::text("hi")).unwrap();
        assert_eq!(text, serde_json::json!({"text": "hi"}));

        let inline = serde_json::to_value(Part::inline("video/mp4", "AAAA".to_string())).unwrap();
        assert_eq!(
            inline,
            serde_json::json!({"inlineData": {"mimeType": "video/mp4", "data": "AAAA"}})
        );
    }

    #[test]
    fn test_into_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"score\":"}, {"text": " 5}"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"score\": 5}");
    }

    #[test]
    fn test_blocked_prompt_is_error() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        let err = response.into_text().unwrap_err();
        assert_eq!(err, GatewayError::RequestFailed("prompt blocked: SAFETY".to_string()));
    }

    #[test]
    fn test_empty_candidates_is_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert_eq!(response.into_text().unwrap_err(), GatewayError::EmptyResponse);
    }

    #[test]
    fn test_status_mapping_uses_error_message() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            convert_status_error(StatusCode::TOO_MANY_REQUESTS, body),
            GatewayError::RateLimited("Quota exceeded".to_string())
        );
        assert_eq!(
            convert_status_error(StatusCode::BAD_GATEWAY, "upstream"),
            GatewayError::RequestFailed("HTTP 502: upstream".to_string())
        );
        assert!(matches!(
            convert_status_error(StatusCode::FORBIDDEN, "{}"),
            GatewayError::AuthenticationFailed(_)
        ));
    }
}
