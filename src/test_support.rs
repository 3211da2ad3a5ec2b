//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{
    ApiError, ChatBackend, ExplainReply, ExplainRequest, FurtherReply, FurtherRequest, Request,
    SaveResponseReply, SaveResponseRequest,
};

/// A backend that answers with canned results and records every request.
///
/// Unscripted operations fail with `ApiError::Network`.
pub struct ScriptedBackend {
    first_question: Option<Result<String, ApiError>>,
    explanation: Option<Result<ExplainReply, ApiError>>,
    reply: Option<Result<String, ApiError>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            first_question: None,
            explanation: None,
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_first_question(mut self, result: Result<String, ApiError>) -> Self {
        self.first_question = Some(result);
        self
    }

    pub fn with_explanation(mut self, result: Result<ExplainReply, ApiError>) -> Self {
        self.explanation = Some(result);
        self
    }

    pub fn with_reply(mut self, result: Result<String, ApiError>) -> Self {
        self.reply = Some(result);
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: Request) {
        self.requests.lock().unwrap().push(request);
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("not scripted".to_string()))
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn save_response(
        &self,
        request: &SaveResponseRequest,
    ) -> Result<SaveResponseReply, ApiError> {
        self.record(Request::FirstQuestion(request.clone()));
        self.first_question
            .clone()
            .unwrap_or_else(unscripted)
            .map(|next_question| SaveResponseReply { next_question })
    }

    async fn explain(&self, request: &ExplainRequest) -> Result<ExplainReply, ApiError> {
        self.record(Request::Explain(request.clone()));
        self.explanation.clone().unwrap_or_else(unscripted)
    }

    async fn further_request(
        &self,
        request: &FurtherRequest,
    ) -> Result<FurtherReply, ApiError> {
        self.record(Request::FollowUp(request.clone()));
        self.reply
            .clone()
            .unwrap_or_else(unscripted)
            .map(|reply| FurtherReply { reply })
    }
}

/// Creates a test App with role `student` and an unscripted backend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(ScriptedBackend::new()),
        Some("student".to_string()),
    )
}
