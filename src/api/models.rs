use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fetcher::SourceLabel;
use crate::pipeline::Summary;

/// Body of both the form post and the JSON endpoint. Absent fields are
/// treated as empty so they surface as missing input.
#[derive(Deserialize, Default)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub source: SourceLabel,
    pub summary: String,
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
    pub status: String,
}

impl From<Summary> for SummarizeResponse {
    fn from(summary: Summary) -> Self {
        Self {
            url: summary.url,
            source: summary.source,
            summary: summary.summary,
            word_count: summary.word_count,
            summarized_at: summary.summarized_at,
            status: "success".to_string(),
        }
    }
}
