//! Video evaluator port.
//!
//! Same contract shape as a rubric evaluator, but the input is a video
//! reference. Adapters download, upload and prompt; the raw response they
//! return is validated by the common rubric parser.

use async_trait::async_trait;
use judge_domain::RubricSpec;
use thiserror::Error;

/// Errors that can occur during video evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    #[error("Failed to download video: {0}")]
    Download(String),

    #[error("Video evaluation failed: {0}")]
    Provider(String),

    #[error("Video evaluation unavailable: {0}")]
    Unavailable(String),
}

/// Port for evaluating a presentation video.
#[async_trait]
pub trait VideoEvaluatorPort: Send + Sync {
    /// The rubric this evaluator scores against (its own category).
    fn rubric(&self) -> &RubricSpec;

    /// Evaluate the referenced video and return the raw response.
    async fn evaluate_video(&self, video_ref: &str) -> Result<String, VideoError>;
}
