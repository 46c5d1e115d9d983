//! GitHub REST API response shapes (only the fields we read).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RepoInfo {
    pub default_branch: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}
