use std::sync::Arc;
use std::time::Instant;

use crate::error::{AppError, Result};
use crate::fetcher::Document;
use crate::llm::CompletionModel;

pub const PROMPT_TEMPLATE: &str =
    "Provide the summary of the following content in 300 words.\nContent:{text}";

const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Stuffs every document into one prompt and asks the model once.
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn CompletionModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    pub async fn summarize(&self, api_key: &str, documents: &[Document]) -> Result<String> {
        if documents.is_empty() {
            return Err(AppError::Summarization("no documents to summarize".to_string()));
        }

        let prompt = build_prompt(&stuff_documents(documents));
        tracing::info!(
            model = self.model.model(),
            prompt_chars = prompt.len(),
            "Calling completion model"
        );

        let started = Instant::now();
        let summary = self.model.complete(api_key, &prompt).await?;
        tracing::info!(elapsed = ?started.elapsed(), summary_chars = summary.len(), "Completion returned");

        Ok(summary)
    }
}

pub fn stuff_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

pub fn build_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replace("{text}", text)
}
