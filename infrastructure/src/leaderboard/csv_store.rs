//! Leaderboard persisted as a CSV file.
//!
//! Layout: `timestamp,github_url,team_name,total_score,<category>...`.
//! Rows are appended; the header is written when the file is created. When
//! an entry carries a category the header lacks, the file is rewritten once
//! with the widened header so no score is dropped.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use judge_application::{LeaderboardEntry, LeaderboardError, LeaderboardPort};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const FIXED_COLUMNS: [&str; 4] = ["timestamp", "github_url", "team_name", "total_score"];

pub struct CsvLeaderboard {
    path: PathBuf,
    // Serializes writers within this process.
    lock: Arc<Mutex<()>>,
}

impl CsvLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LeaderboardPort for CsvLeaderboard {
    async fn append(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        let entry = entry.clone();
        tokio::task::spawn_blocking(move || append_blocking(&path, &entry))
            .await
            .map_err(|e| LeaderboardError::Format(format!("writer task failed: {}", e)))?
    }

    async fn load(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        let mut entries = tokio::task::spawn_blocking(move || read_blocking(&path))
            .await
            .map_err(|e| LeaderboardError::Format(format!("reader task failed: {}", e)))??;
        entries.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        Ok(entries)
    }
}

fn append_blocking(path: &Path, entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() || std::fs::metadata(path)?.len() == 0 {
        let categories: Vec<String> = entry.scores.iter().map(|(c, _)| c.clone()).collect();
        info!("Creating leaderboard {}", path.display());
        return write_all(path, &categories, std::slice::from_ref(entry));
    }

    let categories = read_categories(path)?;
    let missing: Vec<String> = entry
        .scores
        .iter()
        .map(|(c, _)| c.clone())
        .filter(|c| !categories.contains(c))
        .collect();

    if !missing.is_empty() {
        debug!("Widening leaderboard header with {:?}", missing);
        let mut rows = read_blocking(path)?;
        rows.push(entry.clone());
        let mut widened = categories;
        widened.extend(missing);
        return write_all(path, &widened, &rows);
    }

    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(row(entry, &categories)).map_err(csv_error)?;
    writer.flush()?;
    Ok(())
}

fn write_all(
    path: &Path,
    categories: &[String],
    entries: &[LeaderboardEntry],
) -> Result<(), LeaderboardError> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = WriterBuilder::new().from_path(&tmp).map_err(csv_error)?;
        let header = FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(categories.iter().cloned());
        writer.write_record(header).map_err(csv_error)?;
        for entry in entries {
            writer.write_record(row(entry, categories)).map_err(csv_error)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn row(entry: &LeaderboardEntry, categories: &[String]) -> Vec<String> {
    let mut record = vec![
        entry.timestamp.to_rfc3339(),
        entry.github_url.clone(),
        entry.team_name.clone().unwrap_or_default(),
        entry.total_score.to_string(),
    ];
    record.extend(
        categories
            .iter()
            .map(|c| entry.score(c).map(|s| s.to_string()).unwrap_or_default()),
    );
    record
}

fn read_categories(path: &Path) -> Result<Vec<String>, LeaderboardError> {
    let mut reader = ReaderBuilder::new().from_path(path).map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?;
    check_header(headers)?;
    Ok(headers.iter().skip(FIXED_COLUMNS.len()).map(str::to_string).collect())
}

fn read_blocking(path: &Path) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    check_header(&headers)?;

    reader
        .records()
        .enumerate()
        .map(|(i, record)| {
            let record = record.map_err(csv_error)?;
            parse_row(&headers, &record).map_err(|e| {
                LeaderboardError::Format(format!("row {}: {}", i + 2, e))
            })
        })
        .collect()
}

fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<LeaderboardEntry, String> {
    let field = |i: usize| record.get(i).unwrap_or("").trim();

    let timestamp = DateTime::parse_from_rfc3339(field(0))
        .map_err(|e| format!("bad timestamp '{}': {}", field(0), e))?
        .with_timezone(&Utc);
    let team = field(2);
    let total_score = field(3)
        .parse::<u32>()
        .map_err(|_| format!("bad total_score '{}'", field(3)))?;

    let mut scores = Vec::new();
    for (i, category) in headers.iter().enumerate().skip(FIXED_COLUMNS.len()) {
        let value = field(i);
        if value.is_empty() {
            continue;
        }
        let score = value
            .parse::<u32>()
            .map_err(|_| format!("bad score '{}' for {}", value, category))?;
        scores.push((category.to_string(), score));
    }

    Ok(LeaderboardEntry {
        timestamp,
        github_url: field(1).to_string(),
        team_name: (!team.is_empty()).then(|| team.to_string()),
        total_score,
        scores,
    })
}

fn check_header(headers: &StringRecord) -> Result<(), LeaderboardError> {
    let fixed: Vec<&str> = headers.iter().take(FIXED_COLUMNS.len()).collect();
    if fixed != FIXED_COLUMNS {
        return Err(LeaderboardError::Format(format!(
            "unexpected header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }
    Ok(())
}

fn csv_error(e: csv::Error) -> LeaderboardError {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => LeaderboardError::Io(io),
        _ => LeaderboardError::Format(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(url: &str, team: Option<&str>, scores: &[(&str, u32)]) -> LeaderboardEntry {
        LeaderboardEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            github_url: url.to_string(),
            team_name: team.map(str::to_string),
            total_score: scores.iter().map(|(_, s)| s).sum(),
            scores: scores.iter().map(|(c, s)| (c.to_string(), *s)).collect(),
        }
    }

    #[tokio::test]
    async fn test_first_append_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let board = CsvLeaderboard::new(dir.path().join("results.csv"));

        board
            .append(&entry("https://github.com/a/b", Some("Team A"), &[("Innovation", 20), ("Impact", 5)]))
            .await
            .unwrap();

        let text = std::fs::read_to_string(board.path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,github_url,team_name,total_score,Innovation,Impact")
        );
        assert_eq!(
            lines.next(),
            Some("2025-03-01T12:00:00+00:00,https://github.com/a/b,Team A,25,20,5")
        );
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn test_load_sorts_by_total_descending() {
        let dir = tempfile::tempdir().unwrap();
        let board = CsvLeaderboard::new(dir.path().join("results.csv"));

        board.append(&entry("low", None, &[("Innovation", 3)])).await.unwrap();
        board.append(&entry("high", Some("H"), &[("Innovation", 24)])).await.unwrap();
        board.append(&entry("mid", None, &[("Innovation", 12)])).await.unwrap();

        let rows = board.load().await.unwrap();
        let urls: Vec<&str> = rows.iter().map(|r| r.github_url.as_str()).collect();
        assert_eq!(urls, vec!["high", "mid", "low"]);
        assert_eq!(rows[0].team_name.as_deref(), Some("H"));
        assert_eq!(rows[1].team_name, None);
        assert_eq!(rows[0].score("Innovation"), Some(24));
    }

    #[tokio::test]
    async fn test_new_category_widens_header() {
        let dir = tempfile::tempdir().unwrap();
        let board = CsvLeaderboard::new(dir.path().join("results.csv"));

        board.append(&entry("plain", None, &[("Innovation", 10)])).await.unwrap();
        board
            .append(&entry(
                "with-video",
                None,
                &[("Innovation", 8), ("Video Presentation Analysis", 12)],
            ))
            .await
            .unwrap();

        let text = std::fs::read_to_string(board.path()).unwrap();
        assert!(text.starts_with(
            "timestamp,github_url,team_name,total_score,Innovation,Video Presentation Analysis\n"
        ));

        let rows = board.load().await.unwrap();
        assert_eq!(rows.len(), 2);
        let plain = rows.iter().find(|r| r.github_url == "plain").unwrap();
        assert_eq!(plain.score("Video Presentation Analysis"), None);
        let video = rows.iter().find(|r| r.github_url == "with-video").unwrap();
        assert_eq!(video.score("Video Presentation Analysis"), Some(12));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let board = CsvLeaderboard::new(dir.path().join("nope.csv"));
        assert!(board.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "name,age\nbob,3\n").unwrap();

        let board = CsvLeaderboard::new(&path);
        assert!(matches!(board.load().await, Err(LeaderboardError::Format(_))));
        assert!(matches!(
            board.append(&entry("x", None, &[("Innovation", 1)])).await,
            Err(LeaderboardError::Format(_))
        ));
    }

    #[tokio::test]
    async fn test_commas_in_team_name_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let board = CsvLeaderboard::new(dir.path().join("results.csv"));

        board
            .append(&entry("u", Some("Rust, Inc."), &[("Innovation", 1)]))
            .await
            .unwrap();

        let rows = board.load().await.unwrap();
        assert_eq!(rows[0].team_name.as_deref(), Some("Rust, Inc."));
    }
}
