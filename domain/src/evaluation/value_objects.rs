//! Evaluation value objects.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A GitHub repository reference resolved to `owner/name`.
///
/// Accepts `https://github.com/owner/name`, the same with a trailing slash
/// or `.git` suffix, deeper links such as `.../tree/main`, and bare
/// `owner/name`. Any host other than `github.com` / `www.github.com` is
/// rejected. The original text is kept for display in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    owner: String,
    name: String,
    original: String,
}

impl RepositoryRef {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// The reference exactly as submitted (trimmed).
    pub fn as_submitted(&self) -> &str {
        &self.original
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl std::str::FromStr for RepositoryRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let original = s.trim();
        if original.is_empty() {
            return Err(DomainError::InvalidRepository(
                "repository reference is empty".to_string(),
            ));
        }

        let path = strip_github_host(original)?;

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next();
        let name = segments.next().map(|n| n.strip_suffix(".git").unwrap_or(n));

        match (owner, name) {
            (Some(owner), Some(name)) if is_valid_segment(owner) && is_valid_segment(name) => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    original: original.to_string(),
                })
            }
            _ => Err(DomainError::InvalidRepository(format!(
                "cannot resolve owner/name from '{}'",
                original
            ))),
        }
    }
}

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// The path after a GitHub host. Input without a scheme whose first
/// segment looks like a host (contains a dot) is treated as a URL too.
fn strip_github_host(reference: &str) -> Result<&str, DomainError> {
    let (rest, has_scheme) = match reference.split_once("://") {
        Some((scheme, rest)) if is_http(scheme) => (rest, true),
        Some((scheme, _)) => {
            return Err(DomainError::InvalidRepository(format!(
                "unsupported scheme '{}' in '{}'",
                scheme, reference
            )));
        }
        None => (reference, false),
    };

    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    if !has_scheme && !host.contains('.') {
        return Ok(rest);
    }

    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split_once(':').map_or(host, |(h, _)| h);
    if GITHUB_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)) {
        Ok(path)
    } else {
        Err(DomainError::InvalidRepository(format!(
            "'{}' is not a GitHub repository URL",
            reference
        )))
    }
}

pub(crate) fn is_http(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("https") || scheme.eq_ignore_ascii_case("http")
}

fn is_valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
