//! CLI entrypoint for hackathon-judge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use judge_application::{
    EvaluationProgress, ExecutionMode, LeaderboardPort, NoProgress, RunEvaluationUseCase,
};
use judge_domain::Submission;
use judge_infrastructure::{
    ConfigError, ConfigLoader, CsvLeaderboard, FileConfig, GeminiConfig, GeminiLlmGateway,
    GeminiVideoEvaluator, GitHubContentFetcher, GitHubFetcherConfig, JsonlEvaluationLogger,
    YtDlpDownloader,
};
use judge_presentation::{
    AppState, Cli, Command, ConsoleFormatter, EvaluateArgs, LeaderboardArgs, ProgressReporter,
    ServeArgs, SimpleProgress, build_router, serve,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting hackathon-judge");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(ConfigError::from)?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", toml::to_string_pretty(&redacted(&config))?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        ensure_valid(&config, false)?;
        bail!("No command given. Run `hackathon-judge --help` for usage.");
    };

    match command {
        Command::Evaluate(args) => {
            ensure_valid(&config, true)?;
            evaluate(&config, args, cli.quiet).await
        }
        Command::Serve(args) => {
            ensure_valid(&config, true)?;
            serve_api(&config, args).await
        }
        Command::Leaderboard(args) => {
            ensure_valid(&config, false)?;
            show_leaderboard(&config, args).await
        }
    }
}

async fn evaluate(config: &FileConfig, args: EvaluateArgs, quiet: bool) -> Result<()> {
    let mut submission = Submission::from_repo_url(&args.repo)?;
    if let Some(video) = args.video {
        submission = submission.with_video(video)?;
    }
    if let Some(team) = args.team {
        submission = submission.with_team(team);
    }

    let use_case = build_use_case(config, args.parallel, !args.no_leaderboard)?;

    let progress: Box<dyn EvaluationProgress> = if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let report = use_case
        .execute_with_progress(&submission, progress.as_ref())
        .await;

    println!("{}", ConsoleFormatter::render(&report, args.output.into()));
    Ok(())
}

async fn serve_api(config: &FileConfig, args: ServeArgs) -> Result<()> {
    let use_case = build_use_case(config, false, true)?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr = tokio::net::lookup_host((host.as_str(), port))
        .await
        .with_context(|| format!("Cannot resolve bind address {}:{}", host, port))?
        .next()
        .ok_or_else(|| anyhow!("No address for {}:{}", host, port))?;

    let router = build_router(
        AppState::new(Arc::new(use_case)),
        &config.server.cors_origins,
    );
    serve(router, addr).await?;
    Ok(())
}

async fn show_leaderboard(config: &FileConfig, args: LeaderboardArgs) -> Result<()> {
    if !config.leaderboard.enabled {
        bail!("Leaderboard is disabled (set [leaderboard] enabled = true)");
    }

    let board = CsvLeaderboard::new(config.leaderboard.path.clone());
    let mut entries = board
        .load()
        .await
        .with_context(|| format!("Cannot read {}", board.path().display()))?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    let output = match args.output {
        judge_presentation::OutputFormat::Text => ConsoleFormatter::format_leaderboard(&entries),
        judge_presentation::OutputFormat::Json => {
            ConsoleFormatter::format_leaderboard_json(&entries)
        }
    };
    println!("{}", output);
    Ok(())
}

// === Dependency Injection ===
fn build_use_case(
    config: &FileConfig,
    parallel: bool,
    record: bool,
) -> Result<RunEvaluationUseCase> {
    let gateway = Arc::new(GeminiLlmGateway::new(GeminiConfig::from_file(
        &config.providers.gemini,
    )?)?);
    let fetcher = Arc::new(
        GitHubContentFetcher::new(GitHubFetcherConfig::from(&config.github))
            .context("Failed to build GitHub client")?,
    );

    let mut params = config.to_evaluation_config();
    if parallel {
        params = params.with_mode(ExecutionMode::Parallel);
    }

    let mut use_case = RunEvaluationUseCase::new(gateway.clone(), fetcher, params);

    if config.video.enabled {
        match YtDlpDownloader::try_new(&config.video.downloader, config.video.format.clone()) {
            Some(downloader) => {
                let evaluator = GeminiVideoEvaluator::new(
                    gateway.client(),
                    config.models.parse_video().0,
                    Arc::new(downloader.with_max_filesize(config.video.max_bytes)),
                    config.video.max_bytes,
                );
                use_case = use_case.with_video_evaluator(Arc::new(evaluator))?;
            }
            None => warn!(
                "{} not found on PATH; video submissions will score zero",
                config.video.downloader
            ),
        }
    }

    if record && config.leaderboard.enabled {
        use_case = use_case.with_leaderboard(Arc::new(CsvLeaderboard::new(
            config.leaderboard.path.clone(),
        )));
    }

    if let Some(path) = &config.logging.evaluation_log {
        match JsonlEvaluationLogger::open(path) {
            Ok(logger) => {
                info!("Evaluation log: {}", logger.path().display());
                use_case = use_case.with_logger(Arc::new(logger));
            }
            Err(e) => warn!("Could not open evaluation log {}: {}", path.display(), e),
        }
    }

    Ok(use_case)
}

/// Print warnings; print every issue and fail on a fatal one.
fn ensure_valid(config: &FileConfig, require_credentials: bool) -> Result<()> {
    let issues = match config.ensure_valid(require_credentials) {
        Ok(warnings) => warnings,
        Err(err) => {
            for issue in err.issues() {
                let label = if issue.is_error() { "error" } else { "warning" };
                eprintln!("{}: {}", label, issue.message);
            }
            return Err(err.into());
        }
    };
    for issue in issues {
        eprintln!("warning: {}", issue.message);
    }
    Ok(())
}

fn redacted(config: &FileConfig) -> FileConfig {
    let mut config = config.clone();
    if config.providers.gemini.api_key.is_some() {
        config.providers.gemini.api_key = Some("<redacted>".to_string());
    }
    if config.github.token.is_some() {
        config.github.token = Some("<redacted>".to_string());
    }
    config
}
