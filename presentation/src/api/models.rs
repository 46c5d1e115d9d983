use judge_application::LeaderboardEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub repo_url: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub data: Vec<LeaderboardEntry>,
    pub count: usize,
}
