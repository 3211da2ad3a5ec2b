//! # Transcript
//!
//! The ordered list of chat turns shown to the user.
//!
//! Append-only: `Transcript` has `push` and read accessors, nothing that
//! removes, edits or reorders an entry. Display order is insertion order.

use serde::{Deserialize, Serialize};

/// One displayed turn. Serialized with a `type` tag (`user`, `bot`, `mermaid`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    User { text: String },
    /// Assistant text, rendered as markdown.
    Bot { text: String },
    /// Diagram source (mermaid), rendered by the diagram panel.
    #[serde(rename = "mermaid")]
    Diagram { chart: String },
}

impl Entry {
    pub fn user(text: impl Into<String>) -> Self {
        Entry::User { text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Entry::Bot { text: text.into() }
    }

    pub fn diagram(chart: impl Into<String>) -> Self {
        Entry::Diagram {
            chart: chart.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Whether the user has said anything yet.
    pub fn has_user_turns(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, Entry::User { .. }))
    }
}
