//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: evaluation models (Gemini family or custom)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
