use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::Entry;
use crate::tui::component::Component;
use crate::tui::components::diagram;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript entry.
///
/// `user` and `bot` entries render their text as markdown; diagram entries
/// render through the diagram panel. The newest entry gets a non-dim border.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a Entry,
    pub is_latest: bool,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a Entry, is_latest: bool) -> Self {
        Self { entry, is_latest }
    }

    /// Styled body text for an entry.
    pub fn content(entry: &Entry) -> Text<'static> {
        match entry {
            Entry::User { text } => markdown::render(text.trim(), source_color(entry)),
            Entry::Bot { text } => markdown::render(text.trim(), source_color(entry)),
            Entry::Diagram { chart } => diagram::render(chart),
        }
    }

    /// Rows needed to render `entry` at `width`, borders included.
    ///
    /// Uses the same `Paragraph` wrapping as `render`, so the prediction is exact.
    pub fn calculate_height(entry: &Entry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let paragraph = Paragraph::new(Self::content(entry)).wrap(Wrap { trim: false });
        let lines = u16::try_from(paragraph.line_count(content_width)).unwrap_or(u16::MAX);
        lines.max(1).saturating_add(VERTICAL_OVERHEAD)
    }
}

fn source_color(entry: &Entry) -> Color {
    match entry {
        Entry::User { .. } => Color::Green,
        Entry::Bot { .. } => Color::Blue,
        Entry::Diagram { .. } => diagram::DIAGRAM_COLOR,
    }
}

fn title(entry: &Entry) -> String {
    match entry {
        Entry::User { .. } => "you".to_string(),
        Entry::Bot { .. } => "assistant".to_string(),
        Entry::Diagram { chart } => format!("diagram: {}", diagram::kind(chart)),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let color = source_color(self.entry);
        let border_style = if self.is_latest {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        let border_type = match self.entry {
            Entry::Diagram { .. } => BorderType::Double,
            _ => BorderType::Rounded,
        };

        let block = Block::bordered()
            .title(title(self.entry))
            .border_type(border_type)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Self::content(self.entry))
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
