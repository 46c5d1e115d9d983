//! Video downloaders.
//!
//! [`YtDlpDownloader`] shells out to `yt-dlp`. It is created via
//! [`try_new`](YtDlpDownloader::try_new), which returns `None` when the
//! binary is not on `PATH` so callers can degrade gracefully.

use async_trait::async_trait;
use judge_application::VideoError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Fetches a video reference into a directory owned by the caller.
#[async_trait]
pub trait VideoDownloader: Send + Sync {
    /// Download `video_ref` into `dest` and return the written file.
    async fn download(&self, video_ref: &str, dest: &Path) -> Result<PathBuf, VideoError>;
}

pub struct YtDlpDownloader {
    binary: PathBuf,
    format: String,
    max_filesize: Option<u64>,
}

impl YtDlpDownloader {
    /// Try to locate the downloader binary.
    ///
    /// Returns `None` if it is not installed.
    pub fn try_new(binary: &str, format: impl Into<String>) -> Option<Self> {
        match which::which(binary) {
            Ok(path) => {
                info!("Video downloader found at {}", path.display());
                Some(Self {
                    binary: path,
                    format: format.into(),
                    max_filesize: None,
                })
            }
            Err(_) => {
                debug!("{} not found, video evaluation disabled", binary);
                None
            }
        }
    }

    /// Have yt-dlp abort downloads larger than `bytes`.
    pub fn with_max_filesize(mut self, bytes: u64) -> Self {
        self.max_filesize = Some(bytes);
        self
    }

    /// Arguments for one download. `video_ref` always follows `--` so it
    /// is never read as an option.
    fn args(&self, video_ref: &str, template: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--format".into(),
            self.format.clone().into(),
            "--no-playlist".into(),
            "--quiet".into(),
            "--no-warnings".into(),
        ];
        if let Some(bytes) = self.max_filesize {
            args.push("--max-filesize".into());
            args.push(bytes.to_string().into());
        }
        args.push("--output".into());
        args.push(template.into());
        args.push("--".into());
        args.push(video_ref.into());
        args
    }
}

#[async_trait]
impl VideoDownloader for YtDlpDownloader {
    async fn download(&self, video_ref: &str, dest: &Path) -> Result<PathBuf, VideoError> {
        let template = dest.join("video.%(ext)s");
        let output = Command::new(&self.binary)
            .args(self.args(video_ref, &template))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                VideoError::Unavailable(format!("failed to run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("downloader exited with an error");
            return Err(VideoError::Download(reason.trim().to_string()));
        }

        first_file(dest).await
    }
}

/// The single file a downloader left in `dir`.
pub(crate) async fn first_file(dir: &Path) -> Result<PathBuf, VideoError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| VideoError::Download(e.to_string()))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| VideoError::Download(e.to_string()))?
    {
        let path = entry.path();
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(VideoError::Download(
        "downloader reported success but wrote no file".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader() -> YtDlpDownloader {
        YtDlpDownloader {
            binary: PathBuf::from("yt-dlp"),
            format: "best".to_string(),
            max_filesize: None,
        }
    }

    #[test]
    fn test_video_ref_comes_after_separator() {
        let args = downloader().args("--exec=touch /tmp/x", Path::new("/scratch/video.%(ext)s"));

        let separator = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(args.len(), separator + 2);
        assert_eq!(args[separator + 1], "--exec=touch /tmp/x");
        assert!(!args[..separator].iter().any(|a| a == "--exec=touch /tmp/x"));
    }

    #[test]
    fn test_args_carry_format_and_output() {
        let args = downloader().args("https://youtu.be/demo", Path::new("/scratch/video.%(ext)s"));
        assert_eq!(
            args,
            [
                "--format",
                "best",
                "--no-playlist",
                "--quiet",
                "--no-warnings",
                "--output",
                "/scratch/video.%(ext)s",
                "--",
                "https://youtu.be/demo",
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_max_filesize_is_passed_before_separator() {
        let args = downloader()
            .with_max_filesize(1024)
            .args("https://youtu.be/demo", Path::new("/scratch/v.%(ext)s"));

        let flag = args.iter().position(|a| a == "--max-filesize").unwrap();
        assert_eq!(args[flag + 1], "1024");
        assert!(flag < args.iter().position(|a| a == "--").unwrap());
    }

    #[test]
    fn test_missing_binary_returns_none() {
        assert!(YtDlpDownloader::try_new("definitely-not-a-real-binary-xyz", "best").is_none());
    }

    #[tokio::test]
    async fn test_first_file_finds_download() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("video.mp4"), b"data").unwrap();
        let path = first_file(dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "video.mp4");
    }

    #[tokio::test]
    async fn test_first_file_empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            first_file(dir.path()).await,
            Err(VideoError::Download(_))
        ));
    }
}
