//! Presentation layer for hackathon-judge
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the HTTP evaluation API.

pub mod api;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use api::{AppState, build_router, serve};
pub use cli::commands::{Cli, Command, EvaluateArgs, LeaderboardArgs, OutputFormat, ServeArgs};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
