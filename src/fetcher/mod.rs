pub mod webpage;
pub mod youtube;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};

pub use self::webpage::HttpPageLoader;
pub use self::youtube::{TranscriptSegment, YtTranscriptService, extract_video_id};

/// Substrings that route a URL to the transcript branch.
const VIDEO_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceLabel {
    YouTube,
    Website,
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLabel::YouTube => write!(f, "YouTube"),
            SourceLabel::Website => write!(f, "Website"),
        }
    }
}

/// A unit of extracted text handed to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub source: SourceLabel,
}

impl Document {
    pub fn new(content: impl Into<String>, source: SourceLabel) -> Self {
        Self {
            content: content.into(),
            source,
        }
    }
}

#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// Ordered transcript segments for a video.
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}

#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Zero or more documents extracted from the page at `url`.
    async fn load(&self, url: &Url) -> Result<Vec<Document>>;
}

pub fn is_video_url(url: &str) -> bool {
    VIDEO_MARKERS.iter().any(|marker| url.contains(marker))
}

#[derive(Clone)]
pub struct ContentFetcher {
    transcripts: Arc<dyn TranscriptService>,
    pages: Arc<dyn PageLoader>,
}

impl ContentFetcher {
    pub fn new(transcripts: Arc<dyn TranscriptService>, pages: Arc<dyn PageLoader>) -> Self {
        Self { transcripts, pages }
    }

    pub async fn fetch(&self, url: &Url) -> Result<Vec<Document>> {
        let started = Instant::now();

        let mut documents = if is_video_url(url.as_str()) {
            vec![self.fetch_transcript(url).await?]
        } else {
            tracing::debug!(%url, "Loading webpage");
            self.pages.load(url).await?
        };

        documents.retain(|doc| !doc.content.trim().is_empty());
        if documents.is_empty() {
            return Err(AppError::Fetch(format!("no content extracted from {}", url)));
        }

        tracing::info!(
            %url,
            documents = documents.len(),
            chars = documents.iter().map(|doc| doc.content.len()).sum::<usize>(),
            elapsed = ?started.elapsed(),
            "Fetched content"
        );

        Ok(documents)
    }

    async fn fetch_transcript(&self, url: &Url) -> Result<Document> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| AppError::Fetch(format!("no video id found in {}", url)))?;

        tracing::debug!(%video_id, "Fetching transcript");
        let segments = self.transcripts.fetch_segments(&video_id).await?;

        Ok(Document::new(
            youtube::join_segments(&segments),
            SourceLabel::YouTube,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_marker_substring() {
        assert!(is_video_url("https://www.youtube.com/watch?v=abc123"));
        assert!(is_video_url("https://youtu.be/ID456"));
        assert!(is_video_url("https://example.com/?next=youtube.com"));
        assert!(!is_video_url("https://example.com/article"));
        assert!(!is_video_url("https://vimeo.com/123"));
    }

    #[test]
    fn labels_render_as_source_tags() {
        assert_eq!(SourceLabel::YouTube.to_string(), "YouTube");
        assert_eq!(SourceLabel::Website.to_string(), "Website");
    }
}
