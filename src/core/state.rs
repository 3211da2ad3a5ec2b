//! # Application State
//!
//! Core conversation state. No TUI-specific types; presentation state lives
//! in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>   // remote operations
//! ├── role: Option<String>            // forwarded verbatim, never changed
//! ├── user: UserProfile               // sent with the bootstrap request
//! ├── current_step: u32               // guided-collection step counter
//! ├── collection: Collection          // guided / complete
//! ├── bootstrap: Bootstrap            // first-question phase
//! ├── submission: Submission          // idle / submitting token
//! ├── transcript: Transcript          // append-only chat turns
//! └── status_message: String          // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{ChatBackend, UserProfile};
use crate::core::config::ResolvedConfig;
use crate::core::transcript::Transcript;

/// Whether the guided Q&A flow has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Scripted questions; messages are recorded but not sent anywhere.
    Guided,
    /// Free-form: messages go to the explain or follow-up endpoint.
    Complete,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Collection::Guided => "guided",
            Collection::Complete => "free-form",
        }
    }
}

/// Initialization phase for the first scripted question.
///
/// Only `Uninitialized` can issue the bootstrap request, so it is sent at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    Uninitialized,
    AwaitingFirstQuestion,
    Ready,
    /// The request failed; it is not retried.
    Failed,
}

/// Mutual-exclusion token for submissions. Not a queue: a submit while
/// `Submitting` is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Idle,
    Submitting,
}

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub role: Option<String>,
    pub user: UserProfile,
    pub current_step: u32,
    pub collection: Collection,
    pub bootstrap: Bootstrap,
    pub submission: Submission,
    pub transcript: Transcript,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, role: Option<String>) -> Self {
        let role = role.filter(|r| !r.is_empty());
        Self {
            backend,
            user: UserProfile {
                role: role.clone().unwrap_or_default(),
            },
            role,
            current_step: 0,
            collection: Collection::Guided,
            bootstrap: Bootstrap::Uninitialized,
            submission: Submission::Idle,
            transcript: Transcript::new(),
            status_message: String::from("Welcome to chatbox!"),
        }
    }

    pub fn from_config(backend: Arc<dyn ChatBackend>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(backend, config.role.clone());
        if config.free_form {
            app.collection = Collection::Complete;
        }
        app
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// True while any request is outstanding (bootstrap or submission).
    pub fn is_busy(&self) -> bool {
        self.submission == Submission::Submitting
            || self.bootstrap == Bootstrap::AwaitingFirstQuestion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to chatbox!");
        assert_eq!(app.role(), Some("student"));
        assert_eq!(app.user.role, "student");
        assert_eq!(app.current_step, 0);
        assert_eq!(app.collection, Collection::Guided);
        assert_eq!(app.bootstrap, Bootstrap::Uninitialized);
        assert_eq!(app.submission, Submission::Idle);
        assert!(app.transcript.is_empty());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_empty_role_is_absent() {
        let app = App::new(Arc::new(crate::test_support::ScriptedBackend::new()), Some(String::new()));
        assert_eq!(app.role(), None);
    }

    #[test]
    fn test_busy_while_bootstrapping() {
        let mut app = test_app();
        app.bootstrap = Bootstrap::AwaitingFirstQuestion;
        assert!(app.is_busy());
    }
}
