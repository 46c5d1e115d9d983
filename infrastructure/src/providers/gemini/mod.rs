//! Google Gemini provider
//!
//! Text sessions for rubric evaluation and a shared client that also
//! carries inline video payloads.

mod client;
mod gateway;
mod session;
mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use gateway::GeminiLlmGateway;
pub use types::Part;
