use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;
use url_digest::error::{AppError, Result};
use url_digest::fetcher::{Document, PageLoader, SourceLabel};

#[derive(Clone)]
pub struct MockPageLoader {
    pub documents: Vec<Document>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPageLoader {
    pub fn new(contents: &[&str]) -> Self {
        Self {
            documents: contents
                .iter()
                .map(|content| Document::new(*content, SourceLabel::Website))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            documents: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageLoader for MockPageLoader {
    async fn load(&self, url: &Url) -> Result<Vec<Document>> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(AppError::Fetch(msg.clone()));
        }
        Ok(self.documents.clone())
    }
}
