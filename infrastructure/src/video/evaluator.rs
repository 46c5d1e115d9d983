//! Gemini-backed presentation video evaluator.

use super::downloader::VideoDownloader;
use crate::providers::gemini::{GeminiClient, Part};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use judge_application::{VideoError, VideoEvaluatorPort};
use judge_domain::{Model, PromptTemplate, RubricSpec, summarize_assessment, video_rubric};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Downloads a video into a scratch directory, sends it inline to a
/// multimodal model, and converts the assessment into the common
/// `{category, score, feedback}` shape.
///
/// The scratch directory is a [`tempfile::TempDir`] owned by a single
/// call and removed when it goes out of scope.
pub struct GeminiVideoEvaluator {
    client: Arc<GeminiClient>,
    model: Model,
    downloader: Arc<dyn VideoDownloader>,
    rubric: RubricSpec,
    max_bytes: u64,
}

impl GeminiVideoEvaluator {
    pub fn new(
        client: Arc<GeminiClient>,
        model: Model,
        downloader: Arc<dyn VideoDownloader>,
        max_bytes: u64,
    ) -> Self {
        Self {
            client,
            model,
            downloader,
            rubric: video_rubric(),
            max_bytes,
        }
    }

    async fn load(&self, video_ref: &str, dir: &Path) -> Result<(Vec<u8>, &'static str), VideoError> {
        let path = self.downloader.download(video_ref, dir).await?;

        let size = tokio::fs::metadata(&path)
            .await
            .map_err(|e| VideoError::Download(e.to_string()))?
            .len();
        if size > self.max_bytes {
            return Err(VideoError::Provider(format!(
                "video is {} bytes, limit is {}",
                size, self.max_bytes
            )));
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| VideoError::Download(e.to_string()))?;
        Ok((bytes, mime_type(&path)))
    }
}

#[async_trait]
impl VideoEvaluatorPort for GeminiVideoEvaluator {
    fn rubric(&self) -> &RubricSpec {
        &self.rubric
    }

    async fn evaluate_video(&self, video_ref: &str) -> Result<String, VideoError> {
        let scratch = tempfile::Builder::new()
            .prefix("judge-video-")
            .tempdir()
            .map_err(|e| VideoError::Provider(format!("cannot create scratch dir: {}", e)))?;

        info!("Analyzing video {}", video_ref);
        let (bytes, mime) = self.load(video_ref, scratch.path()).await?;
        debug!("Uploading {} bytes ({}) to {}", bytes.len(), mime, self.model);

        let parts = vec![
            Part::inline(mime, STANDARD.encode(&bytes)),
            Part::text(PromptTemplate::video_prompt()),
        ];
        let raw = self
            .client
            .generate(&self.model, None, parts)
            .await
            .map_err(|e| VideoError::Provider(e.to_string()))?;

        summarize_assessment(&raw, &self.rubric).map_err(|e| VideoError::Provider(e.to_string()))
    }
}

fn mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("3gp") => "video/3gpp",
        _ => "video/mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::gemini::GeminiConfig;
    use judge_domain::parse_evaluation;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Writes fixed bytes and remembers where.
    struct FakeDownloader {
        bytes: Vec<u8>,
        seen_dir: Mutex<Option<PathBuf>>,
    }

    impl FakeDownloader {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                seen_dir: Mutex::new(None),
            }
        }

        fn seen_dir(&self) -> PathBuf {
            self.seen_dir.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl VideoDownloader for FakeDownloader {
        async fn download(&self, _video_ref: &str, dest: &Path) -> Result<PathBuf, VideoError> {
            *self.seen_dir.lock().unwrap() = Some(dest.to_path_buf());
            let file = dest.join("video.mp4");
            std::fs::write(&file, &self.bytes).unwrap();
            Ok(file)
        }
    }

    struct FailingDownloader;

    #[async_trait]
    impl VideoDownloader for FailingDownloader {
        async fn download(&self, _video_ref: &str, _dest: &Path) -> Result<PathBuf, VideoError> {
            Err(VideoError::Download("HTTP Error 404".to_string()))
        }
    }

    fn client(base_url: &str) -> Arc<GeminiClient> {
        Arc::new(
            GeminiClient::new(GeminiConfig {
                api_key: "k".to_string(),
                base_url: base_url.to_string(),
                temperature: 0.0,
                timeout_secs: 5,
            })
            .unwrap(),
        )
    }

    fn assessment_response() -> serde_json::Value {
        let assessment = serde_json::json!({
            "total_score": 11,
            "criteria_scores": {
                "clarity_communication": {"score": 3, "feedback": "clear"},
                "structure_organization": {"score": 2, "feedback": "ok"},
                "delivery_presentation": {"score": 2, "feedback": "ok"},
                "content_substance": {"score": 2, "feedback": "ok"},
                "visual_production": {"score": 2, "feedback": "ok"}
            },
            "strengths": ["pace", "demo", "slides", "humor"],
            "areas_for_improvement": ["audio"],
            "overall_feedback": "Solid pitch"
        });
        serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": format!("```json\n{}\n```", assessment)}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_evaluate_video_returns_rubric_json_and_cleans_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash-exp:generateContent"))
            .and(body_string_contains("\"mimeType\":\"video/mp4\""))
            .and(body_string_contains(STANDARD.encode(b"fake-video")))
            .respond_with(ResponseTemplate::new(200).set_body_json(assessment_response()))
            .expect(1)
            .mount(&server)
            .await;

        let downloader = Arc::new(FakeDownloader::new(b"fake-video"));
        let evaluator = GeminiVideoEvaluator::new(
            client(&server.uri()),
            Model::Gemini20FlashExp,
            downloader.clone(),
            1024,
        );

        let raw = evaluator
            .evaluate_video("https://youtu.be/demo")
            .await
            .unwrap();
        let result = parse_evaluation(&raw, evaluator.rubric()).unwrap();

        assert_eq!(result.category, "Video Presentation Analysis");
        assert_eq!(result.score, 11);
        assert!(result.feedback.starts_with("Overall: Solid pitch"));
        assert!(result.feedback.contains("- Clarity & Communication: 3/3"));
        assert!(!result.feedback.contains("humor"));
        assert!(!downloader.seen_dir().exists());
    }

    #[tokio::test]
    async fn test_provider_failure_still_cleans_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let downloader = Arc::new(FakeDownloader::new(b"fake-video"));
        let evaluator = GeminiVideoEvaluator::new(
            client(&server.uri()),
            Model::Gemini20FlashExp,
            downloader.clone(),
            1024,
        );

        let err = evaluator
            .evaluate_video("https://youtu.be/demo")
            .await
            .unwrap_err();

        assert!(matches!(err, VideoError::Provider(_)));
        assert!(!downloader.seen_dir().exists());
    }

    #[tokio::test]
    async fn test_oversized_video_rejected_before_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(assessment_response()))
            .expect(0)
            .mount(&server)
            .await;

        let downloader = Arc::new(FakeDownloader::new(&[0u8; 64]));
        let evaluator = GeminiVideoEvaluator::new(
            client(&server.uri()),
            Model::Gemini20FlashExp,
            downloader.clone(),
            16,
        );

        let err = evaluator.evaluate_video("clip").await.unwrap_err();

        assert_eq!(
            err,
            VideoError::Provider("video is 64 bytes, limit is 16".to_string())
        );
        assert!(!downloader.seen_dir().exists());
    }

    #[tokio::test]
    async fn test_download_failure_is_propagated() {
        let evaluator = GeminiVideoEvaluator::new(
            client("http://127.0.0.1:1"),
            Model::Gemini20FlashExp,
            Arc::new(FailingDownloader),
            1024,
        );

        let err = evaluator.evaluate_video("gone").await.unwrap_err();
        assert_eq!(err, VideoError::Download("HTTP Error 404".to_string()));
    }

    #[test]
    fn test_mime_type_by_extension() {
        assert_eq!(mime_type(Path::new("a.MP4")), "video/mp4");
        assert_eq!(mime_type(Path::new("a.webm")), "video/webm");
        assert_eq!(mime_type(Path::new("a.mov")), "video/quicktime");
        assert_eq!(mime_type(Path::new("noext")), "video/mp4");
    }
}
