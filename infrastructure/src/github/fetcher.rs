use super::models::{RepoInfo, TreeResponse};
use crate::config::FileGitHubConfig;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use judge_application::{ContentFetcherPort, FetchError, RepositoryContent};
use judge_domain::RepositoryRef;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

const RAW_ACCEPT: &str = "application/vnd.github.v3.raw";
const JSON_ACCEPT: &str = "application/vnd.github+json";
const README_MISSING: &str = "README not found";
/// Concurrent file downloads per repository.
const FILE_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct GitHubFetcherConfig {
    pub api_base_url: String,
    pub branch: String,
    pub extensions: Vec<String>,
    pub token: Option<String>,
    pub max_content_bytes: Option<usize>,
    pub timeout_secs: u64,
}

impl From<&FileGitHubConfig> for GitHubFetcherConfig {
    fn from(file: &FileGitHubConfig) -> Self {
        Self {
            api_base_url: file.api_base_url.trim_end_matches('/').to_string(),
            branch: file.branch.clone(),
            extensions: file.extensions.clone(),
            token: file.resolve_token(),
            max_content_bytes: file.max_content_bytes,
            timeout_secs: file.timeout_seconds,
        }
    }
}

/// Fetches README plus allow-listed source files for a repository.
///
/// The result is `README:\n<readme>\n\nSource Files:\n<files>`, each file
/// rendered as `# File: <path>\n<content>\n`. A file that cannot be
/// downloaded is kept as a `# File: <path> could not be fetched` marker.
#[derive(Clone)]
pub struct GitHubContentFetcher {
    client: Client,
    config: GitHubFetcherConfig,
}

impl GitHubContentFetcher {
    pub fn new(config: GitHubFetcherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("hackathon-judge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        if config.token.is_none() {
            debug!("No GitHub token configured; using unauthenticated requests");
        }
        Ok(Self { client, config })
    }

    fn url(&self, repository: &RepositoryRef, tail: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|e| FetchError::Network(format!("invalid GitHub API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Network("GitHub API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["repos", repository.owner(), repository.name()])
            .extend(tail);
        Ok(url)
    }

    async fn get(&self, url: Url, accept: &str) -> Result<reqwest::Response, FetchError> {
        let mut request = self.client.get(url).header("Accept", accept);
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("token {}", token));
        }
        request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    async fn readme(&self, repository: &RepositoryRef) -> Result<String, FetchError> {
        let response = self.get(self.url(repository, &["readme"])?, RAW_ACCEPT).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} has no README", repository.slug());
            return Ok(README_MISSING.to_string());
        }
        if !status.is_success() {
            return Err(status_error(status, repository, response).await);
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    async fn tree(
        &self,
        repository: &RepositoryRef,
        branch: &str,
    ) -> Result<Option<TreeResponse>, FetchError> {
        let mut url = self.url(repository, &["git", "trees", branch])?;
        url.query_pairs_mut().append_pair("recursive", "1");

        let response = self.get(url, JSON_ACCEPT).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status, repository, response).await);
        }
        response
            .json::<TreeResponse>()
            .await
            .map(Some)
            .map_err(|e| FetchError::Network(format!("invalid tree response: {}", e)))
    }

    async fn default_branch(&self, repository: &RepositoryRef) -> Result<String, FetchError> {
        let response = self.get(self.url(repository, &[])?, JSON_ACCEPT).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, repository, response).await);
        }
        response
            .json::<RepoInfo>()
            .await
            .map(|info| info.default_branch)
            .map_err(|e| FetchError::Network(format!("invalid repository response: {}", e)))
    }

    /// Tree of the configured branch, retrying once on the repository's
    /// default branch when the configured one does not exist.
    async fn resolve_tree(
        &self,
        repository: &RepositoryRef,
    ) -> Result<(String, TreeResponse), FetchError> {
        let branch = self.config.branch.clone();
        if let Some(tree) = self.tree(repository, &branch).await? {
            return Ok((branch, tree));
        }

        let fallback = self.default_branch(repository).await?;
        if fallback == branch {
            return Err(FetchError::NotFound(format!(
                "{}@{}",
                repository.slug(),
                branch
            )));
        }

        info!(
            "Branch {} not found in {}, using default branch {}",
            branch,
            repository.slug(),
            fallback
        );
        match self.tree(repository, &fallback).await? {
            Some(tree) => Ok((fallback, tree)),
            None => Err(FetchError::NotFound(format!(
                "{}@{}",
                repository.slug(),
                fallback
            ))),
        }
    }

    fn is_allowed(&self, path: &str) -> bool {
        self.config
            .extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }

    async fn file_section(&self, repository: &RepositoryRef, branch: &str, path: &str) -> String {
        match self.file(repository, branch, path).await {
            Ok(content) => format!("# File: {}\n{}\n", path, content),
            Err(e) => {
                warn!("Could not fetch {}:{}: {}", repository.slug(), path, e);
                format!("# File: {} could not be fetched\n", path)
            }
        }
    }

    async fn file(
        &self,
        repository: &RepositoryRef,
        branch: &str,
        path: &str,
    ) -> Result<String, FetchError> {
        let mut tail = vec!["contents"];
        tail.extend(path.split('/'));
        let mut url = self.url(repository, &tail)?;
        url.query_pairs_mut().append_pair("ref", branch);

        let response = self.get(url, RAW_ACCEPT).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, repository, response).await);
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

#[async_trait]
impl ContentFetcherPort for GitHubContentFetcher {
    async fn fetch(&self, repository: &RepositoryRef) -> Result<RepositoryContent, FetchError> {
        let readme = self.readme(repository).await?;
        let (branch, tree) = self.resolve_tree(repository).await?;
        if tree.truncated {
            warn!("Tree listing for {} was truncated by GitHub", repository.slug());
        }

        let paths: Vec<String> = tree
            .tree
            .iter()
            .filter(|entry| entry.is_blob() && self.is_allowed(&entry.path))
            .map(|entry| entry.path.clone())
            .collect();
        let file_count = paths.len();
        debug!(
            "{}@{}: {} of {} tree entries selected",
            repository.slug(),
            branch,
            file_count,
            tree.tree.len()
        );

        let branch = branch.as_str();
        let sections: Vec<String> = stream::iter(paths)
            .map(move |path| async move { self.file_section(repository, branch, &path).await })
            .buffered(FILE_CONCURRENCY)
            .collect()
            .await;

        let content = RepositoryContent::new(
            format!(
                "README:\n{}\n\nSource Files:\n{}",
                readme,
                sections.join("\n")
            ),
            file_count,
        );
        match self.config.max_content_bytes {
            Some(limit) if content.text.len() > limit => {
                debug!(
                    "Truncating content of {} from {} to {} bytes",
                    repository.slug(),
                    content.text.len(),
                    limit
                );
                Ok(content.capped(limit))
            }
            _ => Ok(content),
        }
    }
}

async fn status_error(
    status: StatusCode,
    repository: &RepositoryRef,
    response: reqwest::Response,
) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FetchError::Unauthorized(format!("{} (HTTP {})", repository.slug(), status.as_u16()))
        }
        StatusCode::NOT_FOUND => FetchError::NotFound(repository.slug()),
        _ => FetchError::Http {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        },
    }
}
