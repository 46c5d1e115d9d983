use axum::Json;
use axum::extract::{Query, State};
use judge_domain::{Report, Submission};
use tracing::{info, warn};

use super::AppState;
use super::error::ApiError;
use super::models::{EvaluateRequest, LeaderboardQuery, LeaderboardResponse};

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn post_evaluate(
    State(state): State<AppState>,
    Json(body): Json<EvaluateRequest>,
) -> Result<Json<Report>, ApiError> {
    let mut submission = Submission::from_repo_url(&body.repo_url)?;
    if let Some(video) = body.video_url {
        submission = submission.with_video(video)?;
    }
    if let Some(team) = body.team_name {
        submission = submission.with_team(team);
    }

    info!("Evaluation requested for {}", submission.repository());
    let report = state.use_case.execute(&submission).await;
    Ok(Json(report))
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let leaderboard = state
        .use_case
        .leaderboard()
        .ok_or_else(|| ApiError::NotFound("leaderboard is not enabled".to_string()))?;

    let mut data = leaderboard.load().await.map_err(|e| {
        warn!("Could not read leaderboard: {}", e);
        ApiError::Internal(e.to_string())
    })?;
    if let Some(limit) = query.limit {
        data.truncate(limit);
    }

    let count = data.len();
    Ok(Json(LeaderboardResponse { data, count }))
}
