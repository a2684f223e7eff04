use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url_digest::error::{AppError, Result};
use url_digest::fetcher::{TranscriptSegment, TranscriptService};

#[derive(Clone)]
pub struct MockTranscripts {
    pub segments: Vec<TranscriptSegment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscripts {
    pub fn new(texts: &[&str]) -> Self {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptSegment::new(*text, i as f64, 1.0))
            .collect();
        Self {
            segments,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TranscriptService for MockTranscripts {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::Fetch(msg.clone()));
        }
        Ok(self.segments.clone())
    }
}
