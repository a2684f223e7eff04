use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;
use crate::pipeline::Stage;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing API key or URL")]
    MissingInput,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch content: {0}")]
    Fetch(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable machine-readable name of the failure cause.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingInput => "missing_input",
            AppError::InvalidUrl(_) => "invalid_url",
            AppError::Fetch(_) => "fetch",
            AppError::Summarization(_) => "summarization",
            AppError::Config(_) => "config",
        }
    }

    /// The pipeline stage this error is raised from.
    pub fn stage(&self) -> Stage {
        match self {
            AppError::MissingInput | AppError::InvalidUrl(_) | AppError::Config(_) => {
                Stage::Validating
            }
            AppError::Fetch(_) => Stage::Fetching,
            AppError::Summarization(_) => Stage::Summarizing,
        }
    }

    /// Fixed message shown to the user for this kind of failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::MissingInput => "Please fill the credentials and URL.",
            AppError::InvalidUrl(_) => "Please enter a valid URL.",
            AppError::Fetch(_) | AppError::Summarization(_) => {
                "An error occurred during summarization."
            }
            AppError::Config(_) => "The server is misconfigured.",
        }
    }

    /// Underlying detail for failures that happen past validation.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::MissingInput | AppError::InvalidUrl(_) => None,
            other => Some(other.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput | AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch(_) | AppError::Summarization(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self.detail() {
            Some(detail) => format!("{} {}", self.user_message(), detail),
            None => self.user_message().to_string(),
        };

        response::error::<()>(self.status_code(), self.kind(), message).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
