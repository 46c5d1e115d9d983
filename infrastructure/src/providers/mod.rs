//! LLM provider adapters.

pub mod gemini;
