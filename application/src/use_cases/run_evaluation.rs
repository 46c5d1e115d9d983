//! Run Evaluation use case
//!
//! Orchestrates one submission: fetch content once, run every rubric
//! evaluator (plus the video evaluator when a video is attached), parse each
//! raw response, and fold the outcomes into a [`Report`].
//!
//! Individual failures never abort the run. Each evaluator resolves to an
//! [`EvaluationOutcome`]; failed outcomes become zero-score placeholders so
//! the report always has one entry per category, in rubric order.

use crate::config::{EvaluationConfig, ExecutionMode, FetchFailurePolicy};
use crate::ports::content_fetcher::{ContentFetcherPort, FetchError, char_prefix};
use crate::ports::evaluation_logger::{EvaluationEvent, EvaluationLogger, NoEvaluationLogger};
use crate::ports::leaderboard::{LeaderboardEntry, LeaderboardPort};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{EvaluationProgress, NoProgress};
use crate::ports::video_evaluator::{VideoError, VideoEvaluatorPort};
use crate::use_cases::evaluate_rubric::RubricEvaluator;
use futures::future::join_all;
use judge_domain::{
    DomainError, EvaluationResult, ParseError, Report, RubricSpec, Submission, extract_json_object,
    parse_evaluation, video_rubric,
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const LOG_PREVIEW_BYTES: usize = 200;

/// Why a single evaluator produced no score.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationFailure {
    #[error("{0}")]
    Provider(#[from] GatewayError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Video(#[from] VideoError),

    #[error("Evaluation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Repository content unavailable: {0}")]
    ContentUnavailable(FetchError),

    #[error("A video was submitted but no video evaluator is configured")]
    VideoNotConfigured,
}

/// Result of one evaluator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    Scored(EvaluationResult),
    Failed {
        category: String,
        failure: EvaluationFailure,
    },
}

impl EvaluationOutcome {
    pub fn category(&self) -> &str {
        match self {
            EvaluationOutcome::Scored(result) => &result.category,
            EvaluationOutcome::Failed { category, .. } => category,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationOutcome::Scored(_))
    }

    /// Fold into a report entry; failures become a zero-score placeholder
    /// whose feedback is the failure description.
    pub fn into_result(self) -> EvaluationResult {
        match self {
            EvaluationOutcome::Scored(result) => result,
            EvaluationOutcome::Failed { category, failure } => {
                EvaluationResult::placeholder(category, failure.to_string())
            }
        }
    }
}

/// One unit of work in a run, in report order.
enum Task<'a> {
    Rubric(&'a RubricSpec),
    Video {
        evaluator: &'a dyn VideoEvaluatorPort,
        video_ref: &'a str,
    },
    VideoNotConfigured(String),
}

impl Task<'_> {
    fn category(&self) -> &str {
        match self {
            Task::Rubric(rubric) => &rubric.category,
            Task::Video { evaluator, .. } => &evaluator.rubric().category,
            Task::VideoNotConfigured(category) => category,
        }
    }

    /// Whether running this task reaches an external provider.
    fn calls_provider(&self, content: &Result<Arc<str>, FetchError>) -> bool {
        match self {
            Task::Rubric(_) => content.is_ok(),
            Task::Video { .. } => true,
            Task::VideoNotConfigured(_) => false,
        }
    }
}

/// Use case for evaluating one submission
pub struct RunEvaluationUseCase {
    evaluator: RubricEvaluator,
    fetcher: Arc<dyn ContentFetcherPort>,
    config: EvaluationConfig,
    video: Option<Arc<dyn VideoEvaluatorPort>>,
    leaderboard: Option<Arc<dyn LeaderboardPort>>,
    logger: Arc<dyn EvaluationLogger>,
}

impl RunEvaluationUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        fetcher: Arc<dyn ContentFetcherPort>,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            evaluator: RubricEvaluator::new(gateway, config.model.clone()),
            fetcher,
            config,
            video: None,
            leaderboard: None,
            logger: Arc::new(NoEvaluationLogger),
        }
    }

    /// Attach a video evaluator.
    ///
    /// Fails when its category collides with a configured rubric.
    pub fn with_video_evaluator(
        mut self,
        video: Arc<dyn VideoEvaluatorPort>,
    ) -> Result<Self, DomainError> {
        let category = &video.rubric().category;
        if self.config.rubrics.contains(category) {
            return Err(DomainError::DuplicateCategory(category.clone()));
        }
        self.video = Some(video);
        Ok(self)
    }

    pub fn with_leaderboard(mut self, leaderboard: Arc<dyn LeaderboardPort>) -> Self {
        self.leaderboard = Some(leaderboard);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn EvaluationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn leaderboard(&self) -> Option<&Arc<dyn LeaderboardPort>> {
        self.leaderboard.as_ref()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, submission: &Submission) -> Report {
        self.execute_with_progress(submission, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        submission: &Submission,
        progress: &dyn EvaluationProgress,
    ) -> Report {
        let repository = submission.repository();
        let tasks = self.plan(submission);

        info!(
            "Evaluating {} with {} evaluators ({:?} mode)",
            repository,
            tasks.len(),
            self.config.mode
        );
        progress.on_evaluation_start(repository.as_submitted(), tasks.len());

        let content = self.fetch_content(submission).await;
        progress.on_fetch_complete(content.is_ok());

        // Stagger slot per task: how many provider calls precede it.
        let mut slots = Vec::with_capacity(tasks.len());
        let mut calls = 0u32;
        for task in &tasks {
            if task.calls_provider(&content) {
                slots.push(Some(calls));
                calls += 1;
            } else {
                slots.push(None);
            }
        }

        let outcomes = match self.config.mode {
            ExecutionMode::Sequential => {
                let mut outcomes = Vec::with_capacity(tasks.len());
                for (task, slot) in tasks.iter().zip(&slots) {
                    if let Some(delay) = self.config.pacing
                        && matches!(slot, Some(n) if *n > 0)
                    {
                        debug!("Pacing {:?} before {}", delay, task.category());
                        tokio::time::sleep(delay).await;
                    }
                    outcomes.push(self.run_task(task, &content, progress).await);
                }
                outcomes
            }
            ExecutionMode::Parallel => {
                let content = &content;
                let futures = tasks.iter().zip(&slots).map(|(task, slot)| async move {
                    if let Some(delay) = self.config.pacing
                        && let Some(n) = *slot
                        && n > 0
                    {
                        tokio::time::sleep(stagger(delay, n)).await;
                    }
                    self.run_task(task, content, progress).await
                });
                join_all(futures).await
            }
        };

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            warn!("{} of {} evaluators failed for {}", failed, outcomes.len(), repository);
        }

        let details = outcomes
            .into_iter()
            .map(EvaluationOutcome::into_result)
            .collect();
        let report = Report::new(repository.as_submitted(), details);

        info!(
            "Evaluation of {} complete: {} points",
            repository,
            report.total_score()
        );
        self.logger.log(EvaluationEvent::new(
            "report",
            serde_json::to_value(&report).unwrap_or_default(),
        ));
        progress.on_evaluation_complete(report.total_score());

        self.record(&report, submission.team()).await;
        report
    }

    /// Rubrics in configured order, then the video category if a video is attached.
    fn plan<'a>(&'a self, submission: &'a Submission) -> Vec<Task<'a>> {
        let mut tasks: Vec<Task<'a>> = self.config.rubrics.iter().map(Task::Rubric).collect();

        if let Some(video_ref) = submission.video() {
            match &self.video {
                Some(evaluator) => tasks.push(Task::Video {
                    evaluator: evaluator.as_ref(),
                    video_ref,
                }),
                None => {
                    let category = video_rubric().category;
                    if self.config.rubrics.contains(&category) {
                        warn!("Video submitted but {} is already a rubric; ignoring video", category);
                    } else {
                        warn!("Video submitted but no video evaluator is configured");
                        tasks.push(Task::VideoNotConfigured(category));
                    }
                }
            }
        }

        tasks
    }

    /// Fetch once. Under [`FetchFailurePolicy::Degrade`] a failure becomes an
    /// error-description body that evaluators still receive.
    async fn fetch_content(&self, submission: &Submission) -> Result<Arc<str>, FetchError> {
        let repository = submission.repository();
        match self.fetcher.fetch(repository).await {
            Ok(content) => {
                debug!(
                    "Fetched {} files ({} bytes) from {}",
                    content.file_count,
                    content.text.len(),
                    repository.slug()
                );
                self.logger.log(EvaluationEvent::new(
                    "content_fetched",
                    json!({
                        "repository": repository.slug(),
                        "files": content.file_count,
                        "bytes": content.text.len(),
                    }),
                ));
                Ok(Arc::from(content.text))
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", repository.slug(), e);
                self.logger.log(EvaluationEvent::new(
                    "fetch_failed",
                    json!({
                        "repository": repository.slug(),
                        "error": e.to_string(),
                        "policy": format!("{:?}", self.config.on_fetch_failure),
                    }),
                ));
                match self.config.on_fetch_failure {
                    FetchFailurePolicy::Degrade => {
                        Ok(Arc::from(format!("Error fetching repo: {e}")))
                    }
                    FetchFailurePolicy::Skip => Err(e),
                }
            }
        }
    }

    async fn run_task(
        &self,
        task: &Task<'_>,
        content: &Result<Arc<str>, FetchError>,
        progress: &dyn EvaluationProgress,
    ) -> EvaluationOutcome {
        let category = task.category().to_string();
        progress.on_rubric_start(&category);

        let result = match task {
            Task::Rubric(rubric) => match content {
                Ok(content) => {
                    self.bounded(async {
                        let raw = self.evaluator.evaluate(rubric, content).await?;
                        self.parse(&raw, rubric)
                    })
                    .await
                }
                Err(e) => Err(EvaluationFailure::ContentUnavailable(e.clone())),
            },
            Task::Video {
                evaluator,
                video_ref,
            } => {
                self.bounded(async {
                    let raw = evaluator.evaluate_video(video_ref).await?;
                    self.parse(&raw, evaluator.rubric())
                })
                .await
            }
            Task::VideoNotConfigured(_) => Err(EvaluationFailure::VideoNotConfigured),
        };

        let outcome = match result {
            Ok(result) => {
                info!("{}: {} points", category, result.score);
                EvaluationOutcome::Scored(result)
            }
            Err(failure) => {
                warn!("{} evaluation failed: {}", category, failure);
                self.logger.log(EvaluationEvent::new(
                    "evaluation_failed",
                    json!({ "category": category, "error": failure.to_string() }),
                ));
                EvaluationOutcome::Failed {
                    category: category.clone(),
                    failure,
                }
            }
        };

        let score = match &outcome {
            EvaluationOutcome::Scored(result) => result.score,
            EvaluationOutcome::Failed { .. } => 0,
        };
        progress.on_rubric_complete(&category, score, outcome.is_success());
        outcome
    }

    fn parse(&self, raw: &str, rubric: &RubricSpec) -> Result<EvaluationResult, EvaluationFailure> {
        debug!(
            "{} raw response: {}",
            rubric.category,
            char_prefix(raw, LOG_PREVIEW_BYTES)
        );
        self.logger.log(EvaluationEvent::new(
            "llm_response",
            json!({ "category": rubric.category, "response": raw }),
        ));

        let result = parse_evaluation(raw, rubric)?;
        if let Some(reported) = reported_category(raw)
            && reported != rubric.category
        {
            debug!(
                "Model reported category {:?} for {}; keeping configured name",
                reported, rubric.category
            );
        }
        Ok(result)
    }

    /// Apply the per-evaluator time limit, if any.
    async fn bounded<F>(&self, fut: F) -> Result<EvaluationResult, EvaluationFailure>
    where
        F: Future<Output = Result<EvaluationResult, EvaluationFailure>>,
    {
        match self.config.evaluator_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .unwrap_or(Err(EvaluationFailure::Timeout(limit))),
            None => fut.await,
        }
    }

    async fn record(&self, report: &Report, team: Option<&str>) {
        let Some(leaderboard) = &self.leaderboard else {
            return;
        };
        let entry = LeaderboardEntry::from_report(report, team, chrono::Utc::now());
        if let Err(e) = leaderboard.append(&entry).await {
            warn!("Failed to record leaderboard entry: {}", e);
        }
    }
}

/// Start offset for the `slot`-th provider call in parallel mode.
fn stagger(delay: Duration, slot: u32) -> Duration {
    delay.saturating_mul(slot)
}

/// The `category` field the model wrote, if the response carries one.
fn reported_category(raw: &str) -> Option<String> {
    let json = extract_json_object(raw).ok()?;
    let value: serde_json::Value = serde_json::from_str(json).ok()?;
    value.get("category")?.as_str().map(str::to_string)
}
