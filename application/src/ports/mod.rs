//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_fetcher;
pub mod evaluation_logger;
pub mod leaderboard;
pub mod llm_gateway;
pub mod progress;
pub mod video_evaluator;
