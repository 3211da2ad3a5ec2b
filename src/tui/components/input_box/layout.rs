//! Visual line layout for the input buffer.
//!
//! The buffer is split on `\n` into logical lines, and each logical line is
//! word-wrapped with textwrap. Every visual line keeps the byte range it
//! occupies in the buffer so the cursor can be mapped to screen cells
//! without re-deriving offsets from wrapped strings.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content rows shown before the box starts scrolling internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Border + left padding before the first text column
pub(super) const TEXT_INSET_X: u16 = 2;
pub(super) const TEXT_INSET_Y: u16 = 1;

/// One row of wrapped text, as a byte range into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VisualLine {
    pub start: usize,
    pub end: usize,
}

impl VisualLine {
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start..self.end]
    }
}

pub(super) fn text_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .word_splitter(textwrap::WordSplitter::NoHyphenation)
}

/// Wrap `buffer` into visual lines at `width` columns. Never empty.
pub(super) fn visual_lines(buffer: &str, width: u16) -> Vec<VisualLine> {
    let mut lines = Vec::new();
    let mut logical_start = 0;

    for logical in buffer.split('\n') {
        if width == 0 || logical.is_empty() {
            lines.push(VisualLine {
                start: logical_start,
                end: logical_start + logical.len(),
            });
        } else {
            let mut offset = 0;
            for segment in textwrap::wrap(logical, wrap_options(width)) {
                // Wrapped segments are in-order substrings; whitespace at breaks is dropped.
                let found = logical[offset..].find(segment.as_ref()).unwrap_or(0);
                let start = offset + found;
                let end = (start + segment.len()).min(logical.len());
                lines.push(VisualLine {
                    start: logical_start + start,
                    end: logical_start + end,
                });
                offset = end;
            }
        }
        logical_start += logical.len() + 1;
    }

    lines
}

/// Index of the visual line holding byte offset `pos`.
pub(super) fn line_of(lines: &[VisualLine], pos: usize) -> usize {
    lines.partition_point(|l| l.start <= pos).saturating_sub(1)
}

/// Display column of `pos` within its visual line.
pub(super) fn column_of(buffer: &str, line: VisualLine, pos: usize) -> u16 {
    buffer[line.start..pos.max(line.start)].width() as u16
}

/// Byte offset in `line` closest to display column `column`, never past the line end.
pub(super) fn offset_at_column(buffer: &str, line: VisualLine, column: u16) -> usize {
    let mut used = 0usize;
    for (i, c) in line.text(buffer).char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > column as usize {
            return line.start + i;
        }
        used += w;
    }
    line.end
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
