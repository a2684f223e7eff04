//! One linear run per trigger: validate, fetch, summarize.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{
    ContentFetcher, HttpPageLoader, PageLoader, SourceLabel, TranscriptService,
    YtTranscriptService,
};
use crate::input::RequestContext;
use crate::llm::{ChatClient, CompletionModel};
use crate::summarizer::Summarizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Validating,
    Fetching,
    Summarizing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating",
            Stage::Fetching => "fetching",
            Stage::Summarizing => "summarizing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub url: String,
    pub source: SourceLabel,
    pub summary: String,
    /// Words in the fetched content, not in the summary.
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SummaryPipeline {
    fetcher: ContentFetcher,
    summarizer: Summarizer,
}

impl SummaryPipeline {
    pub fn new(
        transcripts: Arc<dyn TranscriptService>,
        pages: Arc<dyn PageLoader>,
        model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self {
            fetcher: ContentFetcher::new(transcripts, pages),
            summarizer: Summarizer::new(model),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(YtTranscriptService::new(config.transcript_languages.clone())),
            Arc::new(HttpPageLoader::new(config)?),
            Arc::new(ChatClient::from_config(config)?),
        ))
    }

    /// Runs the whole flow for one trigger. The returned error's variant tells
    /// which stage failed.
    pub async fn run(&self, api_key: &str, target_url: &str) -> Result<Summary> {
        let started = Instant::now();
        tracing::debug!(stage = %Stage::Idle, "Summary requested");

        let result = self.execute(api_key, target_url).await;

        match &result {
            Ok(summary) => tracing::info!(
                stage = %Stage::Done,
                url = %summary.url,
                source = %summary.source,
                elapsed = ?started.elapsed(),
                "Summary generated"
            ),
            Err(err) => tracing::warn!(
                stage = %Stage::Failed,
                failed_in = %err.stage(),
                kind = err.kind(),
                error = %err,
                elapsed = ?started.elapsed(),
                "Summary request failed"
            ),
        }

        result
    }

    async fn execute(&self, api_key: &str, target_url: &str) -> Result<Summary> {
        tracing::debug!(stage = %Stage::Validating, "Validating input");
        let ctx = RequestContext::from_input(api_key, target_url)?;

        tracing::info!(stage = %Stage::Fetching, url = %ctx.target_url, "Fetching content");
        let documents = self.fetcher.fetch(&ctx.target_url).await?;
        let word_count = documents
            .iter()
            .map(|doc| doc.content.split_whitespace().count())
            .sum();
        let source = documents
            .first()
            .map(|doc| doc.source)
            .unwrap_or(SourceLabel::Website);

        tracing::info!(stage = %Stage::Summarizing, word_count, "Summarizing content");
        let summary = self.summarizer.summarize(&ctx.api_key, &documents).await?;

        Ok(Summary {
            url: ctx.target_url.to_string(),
            source,
            summary,
            word_count,
            summarized_at: Utc::now(),
        })
    }
}
