//! Progress notification port
//!
//! Defines the interface for reporting progress during an evaluation run.

/// Callback for progress updates during an evaluation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, logs, etc.)
pub trait EvaluationProgress: Send + Sync {
    /// Called once the submission is accepted, with the number of evaluators that will run
    fn on_evaluation_start(&self, repository: &str, total_evaluators: usize);

    /// Called when content fetching completes
    fn on_fetch_complete(&self, _success: bool) {}

    /// Called when an evaluator starts
    fn on_rubric_start(&self, category: &str);

    /// Called when an evaluator finishes (`success == false` means a placeholder was recorded)
    fn on_rubric_complete(&self, category: &str, score: u32, success: bool);

    /// Called when the report is assembled
    fn on_evaluation_complete(&self, total_score: u32);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EvaluationProgress for NoProgress {
    fn on_evaluation_start(&self, _repository: &str, _total_evaluators: usize) {}
    fn on_rubric_start(&self, _category: &str) {}
    fn on_rubric_complete(&self, _category: &str, _score: u32, _success: bool) {}
    fn on_evaluation_complete(&self, _total_score: u32) {}
}
