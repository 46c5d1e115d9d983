//! Prompt domain
//!
//! Templates for the rubric and video evaluation prompts.

mod template;

pub use template::PromptTemplate;
