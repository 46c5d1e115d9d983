//! Leaderboard persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use judge_domain::Report;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One persisted leaderboard row.
///
/// `scores` keeps report order: one `(category, score)` pair per detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub timestamp: DateTime<Utc>,
    pub github_url: String,
    pub team_name: Option<String>,
    pub total_score: u32,
    pub scores: Vec<(String, u32)>,
}

impl LeaderboardEntry {
    /// Build an entry from a finished report.
    pub fn from_report(report: &Report, team_name: Option<&str>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            github_url: report.repository().to_string(),
            team_name: team_name.map(str::to_string),
            total_score: report.total_score(),
            scores: report
                .details()
                .iter()
                .map(|d| (d.category.clone(), d.score))
                .collect(),
        }
    }

    pub fn score(&self, category: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, s)| *s)
    }
}

/// Errors from leaderboard storage.
#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("leaderboard I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("leaderboard format error: {0}")]
    Format(String),
}

/// Port for recording and reading evaluated submissions.
#[async_trait]
pub trait LeaderboardPort: Send + Sync {
    /// Append a row.
    async fn append(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError>;

    /// Load all rows, highest total first.
    async fn load(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}
