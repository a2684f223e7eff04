use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url_digest::error::{AppError, Result};
use url_digest::llm::CompletionModel;

#[derive(Clone)]
pub struct MockCompletion {
    pub reply: String,
    /// `(api_key, prompt)` for every call.
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockCompletion {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl CompletionModel for MockCompletion {
    fn model(&self) -> &str {
        "mock-gemma"
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), prompt.to_string()));
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::Summarization(msg.clone()));
        }
        Ok(self.reply.clone())
    }
}
