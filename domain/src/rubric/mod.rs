//! Rubrics and the parsing of rubric scores out of model output.
//!
//! - [`spec::RubricSpec`] / [`spec::RubricSet`]: static scoring categories
//! - [`parsing`]: tolerant JSON extraction + strict validation

pub mod parsing;
pub mod spec;
