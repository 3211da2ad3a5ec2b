//! Cursor tracking for the InputBox.
//!
//! `CursorState` owns the byte offset of the cursor and the first visible
//! row. The buffer itself is owned by `InputBox` and passed in explicitly.

use ratatui::layout::Rect;

use super::layout::{
    MAX_VISIBLE_LINES, TEXT_INSET_X, TEXT_INSET_Y, VisualLine, column_of, line_of,
    offset_at_column, text_width, visual_lines,
};

pub(super) struct CursorState {
    /// Byte offset into the buffer, always on a char boundary.
    pub pos: usize,
    /// First visible visual line.
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Start of the logical line holding the cursor.
    pub fn line_start(&self, buffer: &str) -> usize {
        buffer[..self.pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// End of the logical line holding the cursor.
    pub fn line_end(&self, buffer: &str) -> usize {
        buffer[self.pos..]
            .find('\n')
            .map(|i| self.pos + i)
            .unwrap_or(buffer.len())
    }

    /// Scroll just enough to keep the cursor row on screen.
    pub fn follow(&mut self, lines: &[VisualLine]) {
        let total = lines.len() as u16;
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let row = line_of(lines, self.pos) as u16;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
        self.scroll_offset = self.scroll_offset.min(total - MAX_VISIBLE_LINES);
    }

    /// Screen cell for the cursor inside the box drawn at `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = text_width(area.width);
        let lines = visual_lines(buffer, width);
        let row = line_of(&lines, self.pos) as u16;
        let col = column_of(buffer, lines[row as usize], self.pos).min(width.saturating_sub(1));

        (
            area.x + TEXT_INSET_X + col,
            area.y + TEXT_INSET_Y + row.saturating_sub(self.scroll_offset),
        )
    }

    /// Move one visual line up (`up == true`) or down, keeping the column.
    /// Returns false at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, up: bool, area_width: u16) -> bool {
        let lines = visual_lines(buffer, text_width(area_width));
        let row = line_of(&lines, self.pos);
        let target = match (up, row) {
            (true, 0) => return false,
            (true, r) => r - 1,
            (false, r) if r + 1 >= lines.len() => return false,
            (false, r) => r + 1,
        };

        let column = column_of(buffer, lines[row], self.pos);
        self.pos = offset_at_column(buffer, lines[target], column);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_and_end_bounds_are_per_logical_line() {
        let buffer = "first\nsecond";
        let mut cursor = CursorState::new();
        cursor.pos = 9;
        assert_eq!(cursor.line_start(buffer), 6);
        assert_eq!(cursor.line_end(buffer), 12);
    }

    #[test]
    fn screen_pos_accounts_for_border_and_padding() {
        let cursor = CursorState { pos: 3, scroll_offset: 0 };
        assert_eq!(cursor.screen_pos("hello", Rect::new(0, 10, 40, 3)), (5, 11));
    }

    #[test]
    fn screen_pos_follows_newlines() {
        let buffer = "ab\ncd";
        let cursor = CursorState { pos: buffer.len(), scroll_offset: 0 };
        assert_eq!(cursor.screen_pos(buffer, Rect::new(0, 0, 40, 4)), (4, 2));
    }

    #[test]
    fn vertical_moves_keep_column() {
        let buffer = "abcdef\nxy\nlonger line";
        let mut cursor = CursorState { pos: 4, scroll_offset: 0 };

        assert!(cursor.move_vertically(buffer, false, 40));
        // "xy" is shorter: clamp to its end
        assert_eq!(cursor.pos, 9);
        assert!(cursor.move_vertically(buffer, false, 40));
        assert_eq!(cursor.pos, 12);
        assert!(!cursor.move_vertically(buffer, false, 40));

        assert!(cursor.move_vertically(buffer, true, 40));
        assert!(cursor.move_vertically(buffer, true, 40));
        assert!(!cursor.move_vertically(buffer, true, 40));
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn follow_keeps_cursor_row_visible() {
        let buffer = "1\n2\n3\n4\n5\n6\n7\n8";
        let lines = visual_lines(buffer, 20);
        let mut cursor = CursorState { pos: buffer.len(), scroll_offset: 0 };

        cursor.follow(&lines);
        assert_eq!(cursor.scroll_offset, 3);

        cursor.pos = 0;
        cursor.follow(&lines);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
