use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};

/// A hosted chat-completion model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    fn model(&self) -> &str;

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatClient {
    client: Client,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build LLM client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.llm_base_url, &config.llm_model, config.http_timeout)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionModel for ChatClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to make completion request");
                AppError::Summarization(e.to_string())
            })?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            return Err(AppError::Summarization(format!(
                "completion API returned {}: {}",
                status, message
            )));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::Summarization(format!("Invalid completion response: {}", e)))?;

        extract_reply(&json)
    }
}

pub fn extract_reply(json: &serde_json::Value) -> Result<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::Summarization("Invalid response format from LLM".to_string()))
}
