//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod evaluate_rubric;
pub mod run_evaluation;
