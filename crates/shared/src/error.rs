use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Transport,
    HttpStatus,
    Decode,
    Config,
}

/// Serializable projection of a [`SearchError`] for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("failed to reach search service: {0}")]
    Transport(String),
    #[error("Failed to fetch results (HTTP {status})")]
    HttpStatus { status: u16 },
    #[error("malformed search response: {0}")]
    Decode(String),
    #[error("invalid search endpoint: {0}")]
    InvalidEndpoint(String),
}

impl SearchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport(_) => ErrorCode::Transport,
            Self::HttpStatus { .. } => ErrorCode::HttpStatus,
            Self::Decode(_) => ErrorCode::Decode,
            Self::InvalidEndpoint(_) => ErrorCode::Config,
        }
    }
}

impl From<&SearchError> for ApiError {
    fn from(value: &SearchError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<SearchError> for ApiError {
    fn from(value: SearchError) -> Self {
        Self::from(&value)
    }
}
