#![allow(dead_code)]

pub mod completion;
pub mod pages;
pub mod transcripts;

use std::sync::Arc;

use url_digest::pipeline::SummaryPipeline;

use completion::MockCompletion;
use pages::MockPageLoader;
use transcripts::MockTranscripts;

pub fn build_pipeline(
    transcripts: &MockTranscripts,
    pages: &MockPageLoader,
    completion: &MockCompletion,
) -> SummaryPipeline {
    SummaryPipeline::new(
        Arc::new(transcripts.clone()),
        Arc::new(pages.clone()),
        Arc::new(completion.clone()),
    )
}
