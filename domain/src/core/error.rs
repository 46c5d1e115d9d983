//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No rubrics configured")]
    NoRubrics,

    #[error("Duplicate rubric category: {0}")]
    DuplicateCategory(String),

    #[error("Invalid rubric: {0}")]
    InvalidRubric(String),

    #[error("Invalid repository reference: {0}")]
    InvalidRepository(String),

    #[error("Invalid video URL: {0}")]
    InvalidVideo(String),
}
