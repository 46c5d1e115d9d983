//! Evaluation entities: what is judged and what comes out.
//!
//! - [`Submission`] - repository + optional video, immutable once accepted
//! - [`EvaluationResult`] - one category's score and feedback
//! - [`Report`] - all results for one run plus their total

use crate::core::error::DomainError;
use crate::evaluation::value_objects::{RepositoryRef, is_http};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The unit being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    repository: RepositoryRef,
    video: Option<String>,
    team: Option<String>,
}

impl Submission {
    pub fn new(repository: RepositoryRef) -> Self {
        Self {
            repository,
            video: None,
            team: None,
        }
    }

    /// Parse a repository URL (or `owner/name`) into a submission.
    pub fn from_repo_url(repo_url: &str) -> Result<Self, DomainError> {
        Ok(Self::new(repo_url.parse()?))
    }

    /// Attach a presentation video URL. Blank references are ignored;
    /// anything else must be an absolute `http(s)` URL.
    pub fn with_video(mut self, video: impl Into<String>) -> Result<Self, DomainError> {
        let video = video.into();
        let video = video.trim();
        if video.is_empty() {
            self.video = None;
            return Ok(self);
        }
        check_video_url(video)?;
        self.video = Some(video.to_string());
        Ok(self)
    }

    /// Attach a team label (leaderboard only). Blank labels are ignored.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        let team = team.into();
        self.team = (!team.trim().is_empty()).then(|| team.trim().to_string());
        self
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    pub fn video(&self) -> Option<&str> {
        self.video.as_deref()
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }
}

fn check_video_url(url: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidVideo(format!("{} ('{}')", reason, url));

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("contains whitespace"));
    }
    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(invalid("expected an absolute http(s) URL"));
    };
    if !is_http(scheme) {
        return Err(invalid("only http and https are supported"));
    }
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.starts_with('-') {
        return Err(invalid("missing host"));
    }
    Ok(())
}

/// Score and feedback for a single rubric category.
///
/// Invariant (enforced by the parser): `score <= rubric.max_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub category: String,
    pub score: u32,
    pub feedback: String,
}

impl EvaluationResult {
    pub fn new(category: impl Into<String>, score: u32, feedback: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            score,
            feedback: feedback.into(),
        }
    }

    /// Zero-score stand-in for a failed evaluator, preserving report shape.
    ///
    /// The feedback is never empty: a blank reason becomes a generic message.
    pub fn placeholder(category: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let feedback = if reason.trim().is_empty() {
            "Evaluation failed".to_string()
        } else {
            reason
        };
        Self::new(category, 0, feedback)
    }
}

/// Consolidated result of one evaluation run.
///
/// The total is computed at construction and the fields are private, so
/// `total_score == sum(details.score)` always holds (saturating at
/// `u32::MAX` for deserialized input). Details keep the
/// order they were produced in (rubric order) and serialize as a JSON
/// object keyed by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReportWire")]
pub struct Report {
    repository: String,
    total_score: u32,
    #[serde(with = "ordered_details")]
    details: Vec<EvaluationResult>,
}

impl Report {
    /// Build a report from per-category results.
    ///
    /// Categories are expected to be unique; uniqueness is guaranteed
    /// upstream by [`RubricSet`](crate::rubric::spec::RubricSet).
    pub fn new(repository: impl Into<String>, details: Vec<EvaluationResult>) -> Self {
        debug_assert!(
            {
                let mut names: Vec<_> = details.iter().map(|d| d.category.as_str()).collect();
                names.sort_unstable();
                names.windows(2).all(|w| w[0] != w[1])
            },
            "report categories must be unique"
        );
        let total_score = details
            .iter()
            .fold(0u32, |total, d| total.saturating_add(d.score));
        Self {
            repository: repository.into(),
            total_score,
            details,
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Results in rubric order.
    pub fn details(&self) -> &[EvaluationResult] {
        &self.details
    }

    pub fn get(&self, category: &str) -> Option<&EvaluationResult> {
        self.details.iter().find(|d| d.category == category)
    }
}

/// Untrusted wire form; re-derives the total on deserialization.
#[derive(Deserialize)]
struct ReportWire {
    repository: String,
    #[serde(with = "ordered_details")]
    details: Vec<EvaluationResult>,
}

impl TryFrom<ReportWire> for Report {
    type Error = DomainError;

    fn try_from(wire: ReportWire) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::new();
        for d in &wire.details {
            if !seen.insert(d.category.as_str()) {
                return Err(DomainError::DuplicateCategory(d.category.clone()));
            }
        }
        Ok(Report::new(wire.repository, wire.details))
    }
}

/// `Vec<EvaluationResult>` <-> `{category: result}` preserving order.
mod ordered_details {
    use super::*;

    pub fn serialize<S>(details: &[EvaluationResult], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(details.len()))?;
        for d in details {
            map.serialize_entry(&d.category, d)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<EvaluationResult>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DetailsVisitor;

        impl<'de> Visitor<'de> for DetailsVisitor {
            type Value = Vec<EvaluationResult>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to evaluation result")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut details = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, mut value)) =
                    access.next_entry::<String, EvaluationResult>()?
                {
                    value.category = key;
                    details.push(value);
                }
                Ok(details)
            }
        }

        deserializer.deserialize_map(DetailsVisitor)
    }
}
