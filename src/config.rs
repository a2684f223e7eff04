use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "gemma2-9b-it";

const ENV_KEYS: [&str; 7] = [
    "HOST",
    "PORT",
    "LLM_BASE_URL",
    "LLM_MODEL",
    "PAGE_TLS_VERIFY",
    "TRANSCRIPT_LANGUAGES",
    "HTTP_TIMEOUT_SECS",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Verify TLS certificates when loading webpages. Off unless enabled.
    pub page_tls_verify: bool,
    pub transcript_languages: Vec<String>,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let mut vars = HashMap::new();
        for key in ENV_KEYS {
            match env::var(key) {
                Ok(value) => {
                    vars.insert(key, value);
                }
                Err(env::VarError::NotPresent) => {}
                Err(err) => return Err(AppError::from(err)),
            }
        }

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults
    /// for keys that are absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = get("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let llm_base_url = get("LLM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&llm_base_url)
            .map_err(|e| AppError::Config(format!("Invalid LLM_BASE_URL: {}", e)))?;

        let llm_model = get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());

        let page_tls_verify = match get("PAGE_TLS_VERIFY") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| AppError::Config(format!("Invalid PAGE_TLS_VERIFY: {}", raw)))?,
            None => false,
        };

        let transcript_languages: Vec<String> = get("TRANSCRIPT_LANGUAGES")
            .unwrap_or_else(|| "en".to_string())
            .split(',')
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .collect();
        if transcript_languages.is_empty() {
            return Err(AppError::Config(
                "TRANSCRIPT_LANGUAGES must name at least one language".to_string(),
            ));
        }

        let timeout_secs = get("HTTP_TIMEOUT_SECS").unwrap_or_else(|| "30".to_string());
        let timeout_secs = timeout_secs
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| AppError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", timeout_secs)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            llm_base_url,
            llm_model,
            page_tls_verify,
            transcript_languages,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
