//! GitHub content fetching over the REST API.
//!
//! Provides [`GitHubContentFetcher`], which implements the
//! [`ContentFetcherPort`](judge_application::ContentFetcherPort).

mod fetcher;
mod models;

pub use fetcher::{GitHubContentFetcher, GitHubFetcherConfig};
