//! HTTP implementation of [`ChatBackend`] on top of `reqwest`.
//!
//! One `reqwest::Client` is built up front with the base URL, an optional
//! bearer token and a request timeout. Every operation is a JSON POST.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{ApiError, ChatBackend};
use super::types::{
    ExplainReply, ExplainRequest, FurtherReply, FurtherRequest, SaveResponseReply,
    SaveResponseRequest,
};

pub const SAVE_RESPONSE_PATH: &str = "/api/chat/saveResponse";
pub const EXPLAIN_PATH: &str = "/api/explain";
pub const FURTHER_REQUEST_PATH: &str = "/api/chat/furtherRequest";

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Config(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("HTTP backend ready: base_url={}", base_url);

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} -> {}", path, status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error on {}: {} - {}", path, status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(format!("{path}: {e}")))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn save_response(
        &self,
        request: &SaveResponseRequest,
    ) -> Result<SaveResponseReply, ApiError> {
        self.post_json(SAVE_RESPONSE_PATH, request).await
    }

    async fn explain(&self, request: &ExplainRequest) -> Result<ExplainReply, ApiError> {
        self.post_json(EXPLAIN_PATH, request).await
    }

    async fn further_request(
        &self,
        request: &FurtherRequest,
    ) -> Result<FurtherReply, ApiError> {
        self.post_json(FURTHER_REQUEST_PATH, request).await
    }
}
