//! HTTP evaluation API.
//!
//! - `POST /evaluate` runs one submission and returns the report
//! - `GET /leaderboard` lists recorded submissions, best first
//! - `GET /health` liveness probe

mod error;
mod handlers;
mod models;

pub use error::ApiError;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use judge_application::RunEvaluationUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<RunEvaluationUseCase>,
}

impl AppState {
    pub fn new(use_case: Arc<RunEvaluationUseCase>) -> Self {
        Self { use_case }
    }
}

/// Build the API router. `cors_origins` of `["*"]` allows any origin;
/// an empty list installs no CORS layer.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/evaluate", post(handlers::post_evaluate))
        .route("/leaderboard", get(handlers::get_leaderboard));

    let router = match cors_layer(cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return Some(layer.allow_origin(Any));
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();

    Some(layer.allow_origin(parsed))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use judge_application::{
        ContentFetcherPort, EvaluationConfig, FetchError, GatewayError, LeaderboardEntry,
        LeaderboardError, LeaderboardPort, LlmGateway, LlmSession, RepositoryContent,
    };
    use judge_domain::{Model, RepositoryRef};
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    struct FixedSession(Model);

    #[async_trait]
    impl LlmSession for FixedSession {
        fn model(&self) -> &Model {
            &self.0
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            Ok(r#"{"category": "x", "score": 3, "feedback": "fine"}"#.to_string())
        }
    }

    struct FixedGateway;

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn create_session_with_system_prompt(
            &self,
            model: &Model,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(FixedSession(model.clone())))
        }
    }

    struct StaticFetcher;

    #[async_trait]
    impl ContentFetcherPort for StaticFetcher {
        async fn fetch(&self, _repo: &RepositoryRef) -> Result<RepositoryContent, FetchError> {
            Ok(RepositoryContent::new("README:\nhello", 0))
        }
    }

    #[derive(Default)]
    struct MemoryLeaderboard {
        rows: Mutex<Vec<LeaderboardEntry>>,
    }

    #[async_trait]
    impl LeaderboardPort for MemoryLeaderboard {
        async fn append(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
            self.rows.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn load(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
            Ok(rows)
        }
    }

    fn use_case() -> RunEvaluationUseCase {
        RunEvaluationUseCase::new(
            Arc::new(FixedGateway),
            Arc::new(StaticFetcher),
            EvaluationConfig::default().with_pacing(Duration::ZERO),
        )
    }

    fn app(use_case: RunEvaluationUseCase, cors: &[String]) -> Router {
        build_router(AppState::new(Arc::new(use_case)), cors)
    }

    async fn read_body(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let resp = app(use_case(), &[])
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn evaluate_returns_report() {
        let resp = app(use_case(), &[])
            .oneshot(post_json(
                "/evaluate",
                serde_json::json!({"repo_url": "https://github.com/acme/rocket"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["repository"], "https://github.com/acme/rocket");
        assert_eq!(body["total_score"], 15);
        let details = body["details"].as_object().unwrap();
        assert_eq!(details.len(), 5);
        assert_eq!(details["Innovation"]["category"], "Innovation");
        assert_eq!(details["Innovation"]["score"], 3);
    }

    #[tokio::test]
    async fn evaluate_rejects_blank_repo() {
        let resp = app(use_case(), &[])
            .oneshot(post_json("/evaluate", serde_json::json!({"repo_url": "  "})))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn evaluate_rejects_non_github_repo() {
        let resp = app(use_case(), &[])
            .oneshot(post_json(
                "/evaluate",
                serde_json::json!({"repo_url": "https://gitlab.com/acme/rocket"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("not a GitHub"));
    }

    #[tokio::test]
    async fn evaluate_rejects_video_that_is_not_a_url() {
        let resp = app(use_case(), &[])
            .oneshot(post_json(
                "/evaluate",
                serde_json::json!({
                    "repo_url": "acme/rocket",
                    "video_url": "--exec=touch /tmp/x",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert!(body["detail"].as_str().unwrap().starts_with("Invalid video URL"));
    }

    #[tokio::test]
    async fn evaluate_rejects_malformed_body() {
        let resp = app(use_case(), &[])
            .oneshot(
                Request::post("/evaluate")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn leaderboard_missing_is_404() {
        let resp = app(use_case(), &[])
            .oneshot(Request::get("/leaderboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            read_body(resp).await["detail"],
            "leaderboard is not enabled"
        );
    }

    #[tokio::test]
    async fn evaluate_records_and_leaderboard_lists() {
        let board = Arc::new(MemoryLeaderboard::default());
        let router = app(use_case().with_leaderboard(board.clone()), &[]);

        let resp = router
            .clone()
            .oneshot(post_json(
                "/evaluate",
                serde_json::json!({"repo_url": "acme/rocket", "team_name": "Acme"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = router
            .oneshot(
                Request::get("/leaderboard?limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["team_name"], "Acme");
        assert_eq!(body["data"][0]["total_score"], 15);
    }

    #[tokio::test]
    async fn cors_any_origin() {
        let resp = app(use_case(), &["*".to_string()])
            .oneshot(
                Request::get("/health")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn cors_disabled_by_default() {
        let resp = app(use_case(), &[])
            .oneshot(
                Request::get("/health")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn cors_skips_invalid_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]).is_some());
    }
}
