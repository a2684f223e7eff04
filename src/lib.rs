pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod input;
pub mod llm;
pub mod pipeline;
pub mod summarizer;

use std::sync::Arc;
use pipeline::SummaryPipeline;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SummaryPipeline>,
}

impl AppState {
    pub fn new(pipeline: SummaryPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
