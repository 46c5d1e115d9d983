//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for evaluation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored scorecard
    Text,
    /// Report JSON, same shape as the HTTP API
    Json,
}

impl From<OutputFormat> for judge_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => judge_domain::OutputFormat::Text,
            OutputFormat::Json => judge_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for hackathon-judge
#[derive(Parser, Debug)]
#[command(name = "hackathon-judge")]
#[command(author, version, about = "Score hackathon submissions against a rubric with an LLM")]
#[command(long_about = r#"
hackathon-judge scores a GitHub repository (and optionally a presentation
video) against a set of rubric categories using Gemini.

Each category is evaluated independently; a failed category scores zero
with an explanation instead of aborting the run.

Configuration files are loaded from (in priority order):
1. JUDGE_* environment variables (JUDGE_SERVER__PORT=9000)
2. --config <path>     Explicit config file
3. ./judge.toml        Project-level config
4. ~/.config/hackathon-judge/config.toml   Global config

Example:
  hackathon-judge evaluate https://github.com/acme/rocket
  hackathon-judge evaluate acme/rocket --video https://youtu.be/xyz --team Acme
  hackathon-judge serve --port 8000
  hackathon-judge leaderboard --limit 10
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one submission and print the report
    Evaluate(EvaluateArgs),
    /// Serve the evaluation HTTP API
    Serve(ServeArgs),
    /// Show recorded submissions, best first
    Leaderboard(LeaderboardArgs),
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Repository URL or owner/name
    pub repo: String,

    /// Presentation video URL
    #[arg(long, value_name = "URL")]
    pub video: Option<String>,

    /// Team name recorded on the leaderboard
    #[arg(long, value_name = "NAME")]
    pub team: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Run evaluators concurrently (overrides config)
    #[arg(long)]
    pub parallel: bool,

    /// Do not record the result on the leaderboard
    #[arg(long)]
    pub no_leaderboard: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides config)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port (overrides config)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    /// Show at most N entries
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}
