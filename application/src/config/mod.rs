//! Application-level configuration.
//!
//! - [`EvaluationConfig`]: orchestrator control (model, rubrics, pacing, timeouts)

pub mod evaluation_config;

pub use evaluation_config::{EvaluationConfig, ExecutionMode, FetchFailurePolicy};
