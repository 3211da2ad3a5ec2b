//! Diagram panel content.
//!
//! The terminal can't lay out a mermaid graph, so the source is shown as-is
//! with a line-number gutter. The first line (the diagram kind, e.g.
//! `graph TD`) is emphasized.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

pub const DIAGRAM_COLOR: Color = Color::Magenta;

/// Converts diagram source into styled lines.
pub fn render(source: &str) -> Text<'static> {
    let source = source.trim_matches('\n');
    if source.trim().is_empty() {
        return Text::from(Line::from(Span::styled(
            "(empty diagram)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let line_count = source.lines().count();
    let gutter_width = line_count.to_string().len();
    let gutter_style = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line<'static>> = source
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let body_style = if i == 0 {
                Style::default()
                    .fg(DIAGRAM_COLOR)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DIAGRAM_COLOR)
            };
            Line::from(vec![
                Span::styled(format!("{:>gutter_width$} ", i + 1), gutter_style),
                Span::styled(line.replace('\t', "    "), body_style),
            ])
        })
        .collect();

    Text::from(lines)
}

/// Short description of the diagram kind, used as the panel title.
pub fn kind(source: &str) -> &str {
    source
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("diagram")
}
