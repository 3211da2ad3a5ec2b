//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and runs the
//! `Effect`s that `update` returns as tokio tasks.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a request is outstanding): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms and only redraws on events or finished requests.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::api::{ChatBackend, HttpBackend, Request, perform};
use crate::core::action::{Action, Effect, update};
use crate::core::archive;
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_FRAME: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core conversation state)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP backend from the resolved config.
pub fn build_backend(config: &ResolvedConfig) -> io::Result<Arc<dyn ChatBackend>> {
    let backend = HttpBackend::new(
        config.base_url.clone(),
        config.api_token.as_deref(),
        config.timeout,
    )
    .map_err(|e| io::Error::other(e.to_string()))?;
    info!("Using backend at {}", backend.base_url());
    Ok(Arc::new(backend))
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let backend = build_backend(&config)?;
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Finished requests come back here as Action::Completed
    let (tx, rx) = mpsc::channel();
    let mut in_flight: Vec<AbortHandle> = Vec::new();

    if let Effect::Request(request) = update(&mut app, Action::Mount) {
        in_flight.push(spawn_request(app.backend.clone(), request, tx.clone()));
    }

    let start_time = Instant::now();
    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        let busy = app.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / BUSY_FRAME.as_millis()) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(if busy { BUSY_FRAME } else { IDLE_POLL });
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_tui_event(&mut app, &mut tui, event, &tx, &mut in_flight) {
                should_quit = true;
                break;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if apply(&mut app, action, &tx, &mut in_flight) {
                should_quit = true;
            }
        }
        tui.input_box.disabled = app.is_busy();
        in_flight.retain(|h| !h.is_finished());
    }

    abort_all(&mut in_flight);
    drop(rx);

    if config.archive_enabled {
        archive::archive_on_exit(&app);
    }

    ratatui::restore();
    Ok(())
}

/// Route one terminal event to its component or to `update`.
/// Returns true when the loop should exit.
///
/// The input's `disabled` prop is re-synced after every action, so keys later
/// in the same batch cannot clear text that the reducer would drop.
fn handle_tui_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
    in_flight: &mut Vec<AbortHandle>,
) -> bool {
    let action = match event {
        TuiEvent::Resize => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::FreeForm => Some(Action::CompleteCollection),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            None
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => Some(Action::Submit(text)),
            Some(InputEvent::ContentChanged) | None => None,
        },
    };

    let Some(action) = action else {
        return false;
    };
    let quit = apply(app, action, tx, in_flight);
    tui.input_box.disabled = app.is_busy();
    quit
}

/// Run `update` and carry out its effect. Returns true when the loop should exit.
fn apply(
    app: &mut App,
    action: Action,
    tx: &mpsc::Sender<Action>,
    in_flight: &mut Vec<AbortHandle>,
) -> bool {
    debug!("Applying action: {:?}", action);
    match update(app, action) {
        Effect::None => false,
        Effect::Request(request) => {
            in_flight.push(spawn_request(app.backend.clone(), request, tx.clone()));
            false
        }
        Effect::Quit => true,
    }
}

fn abort_all(in_flight: &mut Vec<AbortHandle>) {
    for handle in in_flight.drain(..) {
        handle.abort();
    }
}

fn spawn_request(
    backend: Arc<dyn ChatBackend>,
    request: Request,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning {} request", request.label());
    let handle = tokio::spawn(async move {
        let outcome = perform(backend.as_ref(), request).await;
        if tx.send(Action::Completed(outcome)).is_err() {
            warn!("Request finished after shutdown; result dropped");
        }
    });
    handle.abort_handle()
}
