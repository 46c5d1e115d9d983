//! Gemini implementation of the [`LlmGateway`] port.

use super::client::{GeminiClient, GeminiConfig};
use super::session::GeminiSession;
use async_trait::async_trait;
use judge_application::{GatewayError, LlmGateway, LlmSession};
use judge_domain::Model;
use std::sync::Arc;
use tracing::info;

pub struct GeminiLlmGateway {
    client: Arc<GeminiClient>,
}

impl GeminiLlmGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let base_url = config.base_url.clone();
        let client = GeminiClient::new(config)?;
        info!(base_url = %base_url, "Gemini provider initialized");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Shared client, for adapters that send non-text parts (video).
    pub fn client(&self) -> Arc<GeminiClient> {
        Arc::clone(&self.client)
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(GeminiSession::new(
            self.client(),
            model.clone(),
            Some(system_prompt.to_string()),
        )))
    }
}
