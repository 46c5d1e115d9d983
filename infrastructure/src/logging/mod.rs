//! Structured evaluation logging.
//!
//! Provides [`JsonlEvaluationLogger`], an append-only JSONL writer that
//! implements the [`EvaluationLogger`](judge_application::EvaluationLogger) port.

mod evaluation_log;

pub use evaluation_log::JsonlEvaluationLogger;
