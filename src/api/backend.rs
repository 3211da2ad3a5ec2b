use std::fmt;

use async_trait::async_trait;

use super::types::{
    ExplainReply, ExplainRequest, FurtherReply, FurtherRequest, SaveResponseReply,
    SaveResponseRequest,
};

/// Errors that can occur while talking to the chat backend.
///
/// The transcript shows the same message for every variant; the variant
/// only matters for the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client misconfigured (bad header value, unusable base URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl ApiError {
    /// Short class name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Config(_) => "config",
            ApiError::Network(_) => "network",
            ApiError::Api { .. } => "api",
            ApiError::Parse(_) => "parse",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The three remote operations the chat client performs.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend (for logging).
    fn name(&self) -> &str;

    /// Records the answer for a guided step and returns the next question.
    async fn save_response(
        &self,
        request: &SaveResponseRequest,
    ) -> Result<SaveResponseReply, ApiError>;

    /// Explains a topic, returning text plus diagram source.
    async fn explain(&self, request: &ExplainRequest) -> Result<ExplainReply, ApiError>;

    /// Answers a free-form follow-up message.
    async fn further_request(&self, request: &FurtherRequest)
    -> Result<FurtherReply, ApiError>;
}
