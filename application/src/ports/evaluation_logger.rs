//! Port for structured evaluation logging.
//!
//! Defines the [`EvaluationLogger`] trait for recording evaluation events
//! (prompts sent, raw model responses, parse failures, final reports) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! exchange in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured evaluation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
pub struct EvaluationEvent {
    /// Event type identifier (e.g., "llm_response", "evaluation_failed", "report").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl EvaluationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging evaluation events to a structured log.
///
/// The `log` method is synchronous and non-fallible; write failures are
/// swallowed by the adapter.
pub trait EvaluationLogger: Send + Sync {
    /// Record an evaluation event.
    fn log(&self, event: EvaluationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEvaluationLogger;

impl EvaluationLogger for NoEvaluationLogger {
    fn log(&self, _event: EvaluationEvent) {}
}
