//! Presentation video analysis.
//!
//! Provides [`GeminiVideoEvaluator`], which implements the
//! [`VideoEvaluatorPort`](judge_application::VideoEvaluatorPort), and the
//! [`VideoDownloader`] seam it downloads through.

mod downloader;
mod evaluator;

pub use downloader::{VideoDownloader, YtDlpDownloader};
pub use evaluator::GeminiVideoEvaluator;
