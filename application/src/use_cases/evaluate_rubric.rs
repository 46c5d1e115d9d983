//! Evaluate Rubric use case
//!
//! Sends one rubric prompt to the model and returns the raw response.
//! Parsing and placeholder policy belong to the orchestrator.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use judge_domain::{Model, PromptTemplate, RubricSpec};
use std::sync::Arc;
use tracing::debug;

/// Single-shot rubric evaluator over an [`LlmGateway`].
pub struct RubricEvaluator {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl RubricEvaluator {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Ask the model to score `content` against `rubric`.
    ///
    /// No retries: a provider error is returned as-is.
    pub async fn evaluate(&self, rubric: &RubricSpec, content: &str) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, PromptTemplate::rubric_system())
            .await?;

        let prompt = PromptTemplate::rubric_prompt(rubric, content);
        debug!(
            "Evaluating {} with {} ({} prompt bytes)",
            rubric.category,
            session.model(),
            prompt.len()
        );

        session.send(&prompt).await
    }
}
