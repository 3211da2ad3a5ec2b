//! # Core Application Logic
//!
//! This module contains chatbox's conversation logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Request
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │    API     │
//!             │  Adapter   │ ─────────▶ │  perform() │
//!             │ (ratatui)  │            │  (reqwest) │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and its phase enums
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`transcript`]: Append-only chat turns
//! - [`routing`]: Explain vs. follow-up decision for free-form messages
//! - [`config`]: Layered configuration
//! - [`archive`]: Transcript persistence on exit

pub mod action;
pub mod archive;
pub mod config;
pub mod routing;
pub mod state;
pub mod transcript;
