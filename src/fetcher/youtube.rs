use async_trait::async_trait;
use serde::Serialize;
use url::Url;
use yt_transcript_rs::YouTubeTranscriptApi;

use super::TranscriptService;
use crate::error::{AppError, Result};

/// A timed fragment of a video transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Video id from a `youtube` host's `v` parameter, or the path of a
/// `youtu.be` short link.
pub fn extract_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    let id = if host.contains("youtube") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else if host.contains("youtu.be") {
        Some(url.path().trim_start_matches('/').to_string())
    } else {
        None
    };

    id.filter(|id| !id.trim().is_empty())
}

pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transcript retrieval backed by YouTube's caption tracks.
pub struct YtTranscriptService {
    languages: Vec<String>,
}

impl YtTranscriptService {
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }
}

#[async_trait]
impl TranscriptService for YtTranscriptService {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| AppError::Fetch(e.to_string()))?;
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let fetched = api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, %video_id, "Failed to fetch YouTube transcript");
                AppError::Fetch(format!("transcript unavailable for video {}: {}", video_id, e))
            })?;

        Ok(fetched
            .parts()
            .iter()
            .map(|part| TranscriptSegment::new(part.text.clone(), part.start, part.duration))
            .collect())
    }
}
