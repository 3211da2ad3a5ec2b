//! # InputBox Component
//!
//! Multi-line message editor at the bottom of the screen.
//!
//! The buffer and cursor are internal state. `disabled` is a prop from the
//! application state: while a request is outstanding the box is dimmed and
//! ignores every editing event, so nothing typed can be lost or sent twice.

mod cursor;
mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use layout::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, next_char_boundary, prev_char_boundary, text_width,
    visual_lines,
};

const PLACEHOLDER: &str = "Type your message";
const SEND_HINT: &str = "Enter to send · Ctrl+J newline";
const WAITING_HINT: &str = "Waiting for response...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with non-blank text; the buffer has been cleared.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Prop: a request is in flight.
    pub disabled: bool,
    cursor: CursorState,
    /// Width from the last render, used for vertical cursor movement.
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: CursorState::new(),
            last_width: 80,
        }
    }

    /// Height for the current buffer, between one and `MAX_VISIBLE_LINES` text rows.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = visual_lines(&self.buffer, text_width(area_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }

    fn visible_lines(&self, width: u16) -> Vec<Line<'static>> {
        let style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };

        if self.buffer.is_empty() {
            let hint = if self.disabled { WAITING_HINT } else { PLACEHOLDER };
            return vec![Line::styled(
                hint,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )];
        }

        visual_lines(&self.buffer, width)
            .iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|l| Line::styled(l.text(&self.buffer).to_string(), style))
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, total_rows: u16) {
        if total_rows <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the row count
        let mut state = ScrollbarState::default()
            .content_length(total_rows.saturating_sub(MAX_VISIBLE_LINES) as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_width = area.width;
        let width = text_width(area.width);
        let lines = visual_lines(&self.buffer, width);
        self.cursor.follow(&lines);

        let (title, border_style) = if self.disabled {
            (WAITING_HINT, Style::default().fg(Color::DarkGray))
        } else {
            (SEND_HINT, Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(self.visible_lines(width)).block(block), area);
        self.render_scrollbar(frame, area, lines.len() as u16);

        if !self.disabled {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0; 4];
                self.insert(c.encode_utf8(&mut utf8))
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF from some terminals' bracketed paste
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&text)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                let pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorRight => {
                let pos = next_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorHome => {
                let pos = self.cursor.line_start(&self.buffer);
                self.move_to(pos)
            }
            TuiEvent::CursorEnd => {
                let pos = self.cursor.line_end(&self.buffer);
                self.move_to(pos)
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let up = matches!(event, TuiEvent::CursorUp);
                self.cursor
                    .move_vertically(&self.buffer, up, self.last_width)
                    .then_some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
