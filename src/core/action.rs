//! # Actions
//!
//! Everything that can happen in chatbox becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::Completed(outcome)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller should
//! perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, Outcome, Request, SaveResponseRequest};
use crate::core::routing;
use crate::core::state::{App, Bootstrap, Collection, Submission};
use crate::core::transcript::Entry;

/// Bot turn appended when a submission request fails.
pub const SUBMIT_ERROR_TEXT: &str =
    "An error occurred while processing your request. Please try again.";

/// Bot turn appended when the first question cannot be loaded.
pub const BOOTSTRAP_ERROR_TEXT: &str =
    "Failed to load initial question. Please restart the session.";

#[derive(Debug)]
pub enum Action {
    /// The client is up; fetch the first question if we haven't yet.
    Mount,
    /// User pressed Enter with this text.
    Submit(String),
    /// Switch to free-form mode.
    CompleteCollection,
    /// A spawned request finished.
    Completed(Outcome),
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Caller should run this request and report back with `Action::Completed`.
    Request(Request),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => mount(app),
        Action::Submit(text) => submit(app, text),
        Action::CompleteCollection => {
            if app.collection != Collection::Complete {
                info!("Guided collection complete, switching to free-form");
                app.collection = Collection::Complete;
                app.status_message = String::from("Ask a question, or type \"explain <topic>\"");
            }
            Effect::None
        }
        Action::Completed(outcome) => {
            complete(app, outcome);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn mount(app: &mut App) -> Effect {
    if app.bootstrap != Bootstrap::Uninitialized {
        debug!("Mount ignored: bootstrap already {:?}", app.bootstrap);
        return Effect::None;
    }

    let Some(role) = app.role.clone() else {
        warn!("No role configured; skipping first question");
        app.status_message = String::from("No role configured (use --role)");
        return Effect::None;
    };

    app.bootstrap = Bootstrap::AwaitingFirstQuestion;
    app.status_message = String::from("Loading first question...");
    Effect::Request(Request::FirstQuestion(SaveResponseRequest {
        user: app.user.clone(),
        role,
        step: app.current_step,
    }))
}

fn submit(app: &mut App, text: String) -> Effect {
    if text.trim().is_empty() {
        return Effect::None;
    }
    if app.is_busy() {
        debug!("Submit dropped: request already in flight");
        return Effect::None;
    }

    app.transcript.push(Entry::user(text.as_str()));

    match app.collection {
        Collection::Guided => {
            // No remote call while guided; the token is never taken.
            debug!(
                "Guided answer recorded at step {}; no request sent",
                app.current_step
            );
            Effect::None
        }
        Collection::Complete => {
            let request = routing::route(&text, app.role());
            app.submission = Submission::Submitting;
            app.status_message = match request {
                Request::Explain(_) => String::from("Explaining..."),
                _ => String::from("Waiting for reply..."),
            };
            Effect::Request(request)
        }
    }
}

fn complete(app: &mut App, outcome: Outcome) {
    match outcome {
        Outcome::FirstQuestion(Ok(question)) => {
            app.transcript.push(Entry::bot(question));
            app.current_step = 1;
            app.bootstrap = Bootstrap::Ready;
            app.status_message = String::new();
        }
        Outcome::FirstQuestion(Err(e)) => {
            log_failure("first question", &e);
            app.transcript.push(Entry::bot(BOOTSTRAP_ERROR_TEXT));
            app.bootstrap = Bootstrap::Failed;
            app.status_message = String::from("First question unavailable");
        }
        Outcome::Explanation(Ok(reply)) => {
            app.transcript.push(Entry::bot(reply.explanation));
            app.transcript.push(Entry::diagram(reply.diagram));
            release(app);
        }
        Outcome::Reply(Ok(reply)) => {
            app.transcript.push(Entry::bot(reply));
            release(app);
        }
        Outcome::Explanation(Err(e)) | Outcome::Reply(Err(e)) => {
            log_failure("submission", &e);
            app.transcript.push(Entry::bot(SUBMIT_ERROR_TEXT));
            release(app);
        }
    }
}

fn release(app: &mut App) {
    app.submission = Submission::Idle;
    app.status_message = String::new();
}

fn log_failure(what: &str, e: &ApiError) {
    warn!("Error handling {} ({}): {}", what, e.kind(), e);
}
