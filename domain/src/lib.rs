//! Domain layer for hackathon-judge
//!
//! This crate contains the core evaluation logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Rubric**: a named category with a point ceiling and judging criteria
//! - **Submission**: a repository reference plus an optional presentation video
//! - **Report**: one result per rubric and their total; failed evaluators
//!   contribute a zero-score placeholder so the shape never changes

pub mod config;
pub mod core;
pub mod evaluation;
pub mod prompt;
pub mod rubric;
pub mod video;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use evaluation::{
    entities::{EvaluationResult, Report, Submission},
    value_objects::RepositoryRef,
};
pub use prompt::PromptTemplate;
pub use rubric::{
    parsing::{ParseError, extract_json_object, parse_evaluation},
    spec::{RubricSet, RubricSpec, default_rubrics, video_rubric},
};
pub use video::{VideoAssessment, summarize_assessment};
