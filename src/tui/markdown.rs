//! Markdown → ratatui `Text` renderer.
//!
//! Walks `pulldown_cmark` events and emits styled lines. Supports headings,
//! emphasis, inline code, fenced code (highlighted with syntect), lists,
//! block quotes, rules and links. Tables, images and HTML are dropped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";

/// Render markdown into owned, styled `Text` whose plain text uses `base_fg`.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Renderer {
    base_fg: Color,
    lines: Vec<Line<'static>>,
    /// Spans of the line being built.
    current: Vec<Span<'static>>,
    /// Inline modifiers, innermost last.
    modifiers: Vec<Modifier>,
    /// None = bullet list, Some(n) = next ordinal.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    heading: bool,
    link: Option<String>,
    /// Set while inside a fenced/indented code block.
    code: Option<Option<HighlightLines<'static>>>,
    blank_before_next_block: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            base_fg,
            lines: Vec::new(),
            current: Vec::new(),
            modifiers: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            heading: false,
            link: None,
            code: None,
            blank_before_next_block: false,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        let mut style = Style::default().fg(self.base_fg);
        if self.heading {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.quote_depth > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        for m in &self.modifiers {
            style = style.add_modifier(*m);
        }
        if self.link.is_some() {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn prefix(&self) -> Vec<Span<'static>> {
        (0..self.quote_depth)
            .map(|_| Span::styled("│ ", Style::default().fg(Color::DarkGray)))
            .collect()
    }

    /// Moves the spans being built into a finished line.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = self.prefix();
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn start_block(&mut self) {
        self.flush();
        if self.blank_before_next_block && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.blank_before_next_block = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.current.push(Span::styled(
                code.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak => self.current.push(Span::styled(" ", self.style())),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.start_block();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.blank_before_next_block = true;
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs directly inside a list item stay on the marker line.
                if self.current.is_empty() {
                    self.start_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.heading = true;
                let marker = format!("{} ", "#".repeat(heading_depth(level)));
                self.current.push(Span::styled(marker, self.style()));
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let border = Style::default().fg(Color::DarkGray);
                self.lines.push(Line::from(vec![
                    Span::styled("╭── ", border),
                    Span::styled(lang.clone(), border.add_modifier(Modifier::BOLD)),
                ]));
                let highlighter = SYNTAX_SET
                    .find_syntax_by_token(&lang)
                    .filter(|_| !lang.is_empty())
                    .map(|syntax| HighlightLines::new(syntax, &THEME_SET.themes[CODE_THEME]));
                self.code = Some(highlighter);
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                } else {
                    self.flush();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}- "),
                };
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.modifiers.push(Modifier::ITALIC),
            Tag::Strong => self.modifiers.push(Modifier::BOLD),
            Tag::Strikethrough => self.modifiers.push(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                self.blank_before_next_block = true;
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = false;
                self.blank_before_next_block = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_before_next_block = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.lines.push(Line::from(Span::styled(
                    "╰──",
                    Style::default().fg(Color::DarkGray),
                )));
                self.blank_before_next_block = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_before_next_block = true;
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.modifiers.pop();
            }
            TagEnd::Link => {
                if let Some(url) = self.link.take() {
                    self.current.push(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        // ratatui renders \t as zero-width
        let text = text.replace('\t', "    ");

        if let Some(highlighter) = self.code.as_mut() {
            let border = Span::styled("│ ", Style::default().fg(Color::DarkGray));
            for line in LinesWithEndings::from(&text) {
                let mut spans = vec![border.clone()];
                match highlighter
                    .as_mut()
                    .and_then(|hl| hl.highlight_line(line, &SYNTAX_SET).ok())
                {
                    Some(ranges) => {
                        spans.extend(ranges.into_iter().filter_map(|(style, fragment)| {
                            let fragment = fragment.trim_end_matches('\n');
                            (!fragment.is_empty()).then(|| {
                                let fg = Color::Rgb(
                                    style.foreground.r,
                                    style.foreground.g,
                                    style.foreground.b,
                                );
                                Span::styled(fragment.to_string(), Style::default().fg(fg))
                            })
                        }));
                    }
                    None => spans.push(Span::styled(
                        line.trim_end_matches('\n').to_string(),
                        Style::default().fg(Color::White),
                    )),
                }
                self.lines.push(Line::from(spans));
            }
            return;
        }

        let style = self.style();
        self.current.push(Span::styled(text, style));
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green);
        assert_eq!(plain_lines(&text), vec!["hello"]);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn heading_text_is_bold() {
        let text = render("## Photosynthesis", Color::Blue);
        let line = &text.lines[0];
        assert_eq!(plain_lines(&text)[0], "## Photosynthesis");
        assert!(line.spans.iter().all(|s| s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn bold_span_is_bold() {
        let text = render("Some **bold** text", Color::Blue);
        let span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "bold")
            .unwrap();
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        let text = render("first\n\nsecond", Color::Blue);
        assert_eq!(plain_lines(&text), vec!["first", "", "second"]);
    }

    #[test]
    fn lists_get_markers() {
        let text = render("1. one\n2. two\n\n- dot", Color::Blue);
        assert_eq!(plain_lines(&text), vec!["1. one", "2. two", "", "- dot"]);
    }

    #[test]
    fn code_block_is_framed() {
        let text = render("```\nline1\nline2\n```", Color::Blue);
        let lines = plain_lines(&text);
        assert!(lines[0].starts_with('╭'));
        assert_eq!(lines[1], "│ line1");
        assert_eq!(lines[2], "│ line2");
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue);
        assert!(plain_lines(&text).iter().all(|l| !l.contains('\t')));
        assert!(plain_lines(&text).iter().any(|l| l.contains("    indented")));
    }

    #[test]
    fn link_url_is_appended() {
        let text = render("[docs](https://example.com)", Color::Blue);
        assert_eq!(plain_lines(&text), vec!["docs (https://example.com)"]);
    }
}
