//! Content fetcher port.
//!
//! Retrieves the text blob (README + source files) a submission is judged
//! on. Failures come back as a tagged [`FetchError`]; what to do with them
//! is the orchestrator's decision, not the adapter's.

use async_trait::async_trait;
use judge_domain::RepositoryRef;
use thiserror::Error;

/// Text content assembled from a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContent {
    /// README section followed by every fetched file
    pub text: String,
    /// Number of files included (README excluded)
    pub file_count: usize,
}

impl RepositoryContent {
    pub fn new(text: impl Into<String>, file_count: usize) -> Self {
        Self {
            text: text.into(),
            file_count,
        }
    }

    /// Cut the text to at most `max_bytes`, backing off to the previous
    /// UTF-8 boundary so a multi-byte character is never split.
    pub fn capped(mut self, max_bytes: usize) -> Self {
        let end = char_prefix(&self.text, max_bytes).len();
        self.text.truncate(end);
        self
    }
}

/// Longest prefix of `s` that fits in `max_bytes` and ends on a char boundary.
pub(crate) fn char_prefix(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Errors that can occur while fetching repository content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("repository or branch not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

/// Port for fetching repository content.
#[async_trait]
pub trait ContentFetcherPort: Send + Sync {
    async fn fetch(&self, repository: &RepositoryRef) -> Result<RepositoryContent, FetchError>;
}
