//! Evaluation run configuration from TOML (`[evaluation]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [evaluation]
//! delay_ms = 5000
//! timeout_seconds = 120
//! mode = "sequential"          # or "parallel"
//! on_fetch_failure = "degrade" # or "skip"
//!
//! [[evaluation.rubrics]]
//! category = "Technical"
//! title = "Technical Depth & Code Quality"
//! max_score = 30
//! criteria = "Architecture, tests, idiomatic code."
//! ```
//!
//! When `rubrics` is empty the built-in hackathon rubrics are used.

use judge_application::{ExecutionMode, FetchFailurePolicy};
use judge_domain::{ConfigIssue, ConfigIssueCode, RubricSet, RubricSpec};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One rubric override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRubricConfig {
    pub category: String,
    #[serde(default)]
    pub title: Option<String>,
    pub max_score: u32,
    #[serde(default)]
    pub criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    /// Delay between evaluator invocations in milliseconds (0 disables)
    pub delay_ms: u64,
    /// Per-evaluator timeout in seconds (0 disables)
    pub timeout_seconds: u64,
    /// "sequential" or "parallel"
    pub mode: String,
    /// "degrade" or "skip"
    pub on_fetch_failure: String,
    /// Rubric overrides, in report order
    pub rubrics: Vec<FileRubricConfig>,
}

impl Default for FileEvaluationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 5000,
            timeout_seconds: 120,
            mode: "sequential".to_string(),
            on_fetch_failure: "degrade".to_string(),
            rubrics: Vec::new(),
        }
    }
}

impl FileEvaluationConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn evaluator_timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    /// Parse mode, falling back to sequential with a warning.
    pub fn parse_mode(&self) -> (ExecutionMode, Vec<ConfigIssue>) {
        match self.mode.parse() {
            Ok(mode) => (mode, Vec::new()),
            Err(_) => (
                ExecutionMode::default(),
                vec![invalid_enum(
                    "evaluation.mode",
                    &self.mode,
                    &["sequential", "parallel"],
                    "sequential",
                )],
            ),
        }
    }

    /// Parse fetch-failure policy, falling back to degrade with a warning.
    pub fn parse_fetch_failure(&self) -> (FetchFailurePolicy, Vec<ConfigIssue>) {
        match self.on_fetch_failure.parse() {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => (
                FetchFailurePolicy::default(),
                vec![invalid_enum(
                    "evaluation.on_fetch_failure",
                    &self.on_fetch_failure,
                    &["degrade", "skip"],
                    "degrade",
                )],
            ),
        }
    }

    /// Build the rubric set. Invalid overrides are errors; the defaults are
    /// returned alongside them so callers always get a usable value.
    pub fn parse_rubrics(&self) -> (RubricSet, Vec<ConfigIssue>) {
        if self.rubrics.is_empty() {
            return (RubricSet::hackathon_defaults(), Vec::new());
        }

        let mut issues = Vec::new();
        let mut specs = Vec::with_capacity(self.rubrics.len());
        for (i, rubric) in self.rubrics.iter().enumerate() {
            let field = format!("evaluation.rubrics[{}]", i);
            match RubricSpec::new(
                rubric.category.trim(),
                rubric.title.clone().unwrap_or_default(),
                rubric.max_score,
                rubric.criteria.clone(),
            ) {
                Ok(spec) => specs.push(spec),
                Err(e) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidRubric {
                        field: field.clone(),
                    },
                    format!("{}: {}", field, e),
                )),
            }
        }

        if !issues.is_empty() {
            return (RubricSet::hackathon_defaults(), issues);
        }

        match RubricSet::new(specs) {
            Ok(set) => (set, issues),
            Err(e) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidRubric {
                        field: "evaluation.rubrics".to_string(),
                    },
                    format!("evaluation.rubrics: {}", e),
                ));
                (RubricSet::hackathon_defaults(), issues)
            }
        }
    }
}

fn invalid_enum(field: &str, value: &str, valid: &[&str], fallback: &str) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
            valid_values: valid.iter().map(|s| s.to_string()).collect(),
        },
        format!(
            "{}: unknown value '{}', falling back to '{}'",
            field, value, fallback
        ),
    )
}
