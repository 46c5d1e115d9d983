//! Evaluation parameters: run-loop control for the orchestrator.
//!
//! [`EvaluationConfig`] groups everything
//! [`RunEvaluationUseCase`](crate::use_cases::run_evaluation::RunEvaluationUseCase)
//! needs to decide *how* a submission is judged: which model, which rubrics,
//! how fast, and what to do when content cannot be fetched.

use judge_domain::{Model, RubricSet};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How rubric evaluators are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One evaluator at a time, in rubric order, with pacing between calls.
    #[default]
    Sequential,
    /// All evaluators at once; pacing becomes a start stagger.
    Parallel,
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            other => Err(format!("unknown execution mode: {other}")),
        }
    }
}

/// What to do when repository content cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Evaluators still run, on a body describing the fetch error.
    #[default]
    Degrade,
    /// Every rubric gets a placeholder without calling the model.
    Skip,
}

impl std::str::FromStr for FetchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "degrade" => Ok(FetchFailurePolicy::Degrade),
            "skip" => Ok(FetchFailurePolicy::Skip),
            other => Err(format!("unknown fetch failure policy: {other}")),
        }
    }
}

/// Orchestrator parameters.
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Model used for rubric prompts.
    pub model: Model,
    /// Rubrics evaluated against repository content, in report order.
    pub rubrics: RubricSet,
    /// Delay between evaluator invocations (`None` disables pacing).
    pub pacing: Option<Duration>,
    /// Per-evaluator time limit (`None` waits indefinitely).
    pub evaluator_timeout: Option<Duration>,
    pub mode: ExecutionMode,
    pub on_fetch_failure: FetchFailurePolicy,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            rubrics: RubricSet::hackathon_defaults(),
            pacing: Some(Duration::from_secs(5)),
            evaluator_timeout: Some(Duration::from_secs(120)),
            mode: ExecutionMode::Sequential,
            on_fetch_failure: FetchFailurePolicy::Degrade,
        }
    }
}

impl EvaluationConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_rubrics(mut self, rubrics: RubricSet) -> Self {
        self.rubrics = rubrics;
        self
    }

    /// Set the pacing delay. A zero duration disables pacing.
    pub fn with_pacing(mut self, delay: Duration) -> Self {
        self.pacing = (!delay.is_zero()).then_some(delay);
        self
    }

    pub fn with_evaluator_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.evaluator_timeout = timeout;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fetch_failure_policy(mut self, policy: FetchFailurePolicy) -> Self {
        self.on_fetch_failure = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hackathon_setup() {
        let config = EvaluationConfig::default();
        assert_eq!(config.model, Model::Gemini20Flash);
        assert_eq!(config.rubrics.len(), 5);
        assert_eq!(config.pacing, Some(Duration::from_secs(5)));
        assert_eq!(config.evaluator_timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.mode, ExecutionMode::Sequential);
        assert_eq!(config.on_fetch_failure, FetchFailurePolicy::Degrade);
    }

    #[test]
    fn test_zero_pacing_disables_delay() {
        let config = EvaluationConfig::default().with_pacing(Duration::ZERO);
        assert_eq!(config.pacing, None);

        let config = config.with_pacing(Duration::from_millis(250));
        assert_eq!(config.pacing, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_mode_and_policy_parse_case_insensitively() {
        assert_eq!("Parallel".parse(), Ok(ExecutionMode::Parallel));
        assert_eq!("sequential".parse(), Ok(ExecutionMode::Sequential));
        assert!("fast".parse::<ExecutionMode>().is_err());

        assert_eq!("SKIP".parse(), Ok(FetchFailurePolicy::Skip));
        assert_eq!("degrade".parse(), Ok(FetchFailurePolicy::Degrade));
        assert!("ignore".parse::<FetchFailurePolicy>().is_err());
    }
}
