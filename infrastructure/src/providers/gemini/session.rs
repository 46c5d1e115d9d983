//! Gemini LLM session implementation
//!
//! `generateContent` is stateless; a session just pins the model and
//! system prompt so every call is a fresh single-shot request.

use super::client::GeminiClient;
use super::types::Part;
use async_trait::async_trait;
use judge_application::{GatewayError, LlmSession};
use judge_domain::Model;
use std::sync::Arc;

pub struct GeminiSession {
    client: Arc<GeminiClient>,
    model: Model,
    system_prompt: Option<String>,
}

impl GeminiSession {
    pub fn new(client: Arc<GeminiClient>, model: Model, system_prompt: Option<String>) -> Self {
        Self {
            client,
            model,
            system_prompt,
        }
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.client
            .generate(
                &self.model,
                self.system_prompt.as_deref(),
                vec![Part::text(content)],
            )
            .await
    }
}
