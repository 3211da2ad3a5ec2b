//! Runs a [`Request`] against a backend and packages the result as an [`Outcome`].
//!
//! The reducer decides *what* to send (`Effect::Request`); the event loop
//! spawns `perform` and feeds the outcome back as `Action::Completed`.

use log::{info, warn};

use super::backend::{ApiError, ChatBackend};
use super::types::{ExplainReply, ExplainRequest, FurtherRequest, SaveResponseRequest};

/// A remote call the core wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Bootstrap: fetch the first scripted question.
    FirstQuestion(SaveResponseRequest),
    Explain(ExplainRequest),
    FollowUp(FurtherRequest),
}

impl Request {
    pub fn label(&self) -> &'static str {
        match self {
            Request::FirstQuestion(_) => "first-question",
            Request::Explain(_) => "explain",
            Request::FollowUp(_) => "follow-up",
        }
    }
}

/// Result of a [`Request`], one variant per request kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FirstQuestion(Result<String, ApiError>),
    Explanation(Result<ExplainReply, ApiError>),
    Reply(Result<String, ApiError>),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        match self {
            Outcome::FirstQuestion(r) => r.is_ok(),
            Outcome::Explanation(r) => r.is_ok(),
            Outcome::Reply(r) => r.is_ok(),
        }
    }
}

pub async fn perform(backend: &dyn ChatBackend, request: Request) -> Outcome {
    let label = request.label();
    info!("Sending {} request via {} backend", label, backend.name());

    let outcome = match request {
        Request::FirstQuestion(req) => Outcome::FirstQuestion(
            backend
                .save_response(&req)
                .await
                .map(|reply| reply.next_question),
        ),
        Request::Explain(req) => Outcome::Explanation(backend.explain(&req).await),
        Request::FollowUp(req) => {
            Outcome::Reply(backend.further_request(&req).await.map(|reply| reply.reply))
        }
    };

    if outcome.is_ok() {
        info!("{} request succeeded", label);
    } else {
        warn!("{} request failed", label);
    }
    outcome
}
