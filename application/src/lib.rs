//! Application layer for hackathon-judge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EvaluationConfig, ExecutionMode, FetchFailurePolicy};
pub use ports::{
    content_fetcher::{ContentFetcherPort, FetchError, RepositoryContent},
    evaluation_logger::{EvaluationEvent, EvaluationLogger, NoEvaluationLogger},
    leaderboard::{LeaderboardEntry, LeaderboardError, LeaderboardPort},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{EvaluationProgress, NoProgress},
    video_evaluator::{VideoError, VideoEvaluatorPort},
};
pub use use_cases::evaluate_rubric::RubricEvaluator;
pub use use_cases::run_evaluation::{EvaluationFailure, EvaluationOutcome, RunEvaluationUseCase};
