//! Presentation video assessment.
//!
//! The multimodal model answers with a richer structure than the rubric
//! contract (five 0-3 criteria, strengths, improvements). [`summarize_assessment`]
//! folds that into the common `{category, score, feedback}` shape so the
//! regular rubric parser can validate it.

mod assessment;

pub use assessment::{CRITERION_MAX, CriteriaScores, CriterionScore, VideoAssessment, summarize_assessment};
