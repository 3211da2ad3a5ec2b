//! # TitleBar Component
//!
//! One-line header: role, collection phase, status message, and a spinner
//! while a request is outstanding. Stateless; every field is a prop.
//!
//! ```text
//! chatbox (role: student) | guided | Loading first question... ⠋
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar<'a> {
    pub role: Option<&'a str>,
    /// `guided` or `free-form`
    pub phase: &'a str,
    pub status_message: &'a str,
    /// Some(frame) while busy.
    pub spinner_frame: Option<usize>,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        role: Option<&'a str>,
        phase: &'a str,
        status_message: &'a str,
        spinner_frame: Option<usize>,
    ) -> Self {
        Self {
            role,
            phase,
            status_message,
            spinner_frame,
        }
    }

    fn line(&self) -> Line<'static> {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            Span::styled("chatbox", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(match self.role {
                Some(role) => format!(" (role: {role})"),
                None => " (no role)".to_string(),
            }),
            separator.clone(),
            Span::styled(self.phase.to_string(), Style::default().fg(Color::Cyan)),
        ];

        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::raw(self.status_message.to_string()));
        }

        if let Some(frame) = self.spinner_frame {
            spans.push(Span::styled(
                format!(" {}", SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]),
                Style::default().fg(Color::Yellow),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
