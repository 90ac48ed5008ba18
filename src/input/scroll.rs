/// Scroll handling for both panes.
use crate::App;
use ratatui::prelude::Rect;

impl App {
    /// Scroll the console pane by `delta` lines (positive scrolls down).
    ///
    /// Scrolling away from the bottom stops the view from following new
    /// output; scrolling back to the bottom resumes it.
    pub fn handle_console_scroll(&mut self, delta: i16, console_area: Rect) {
        let max_scroll = self.max_console_scroll(console_area);

        let new_scroll = if delta > 0 {
            self.console_scroll.saturating_add(delta as usize)
        } else {
            self.console_scroll.saturating_sub((-delta) as usize)
        };

        self.console_scroll = new_scroll.min(max_scroll);
        self.follow_output = self.console_scroll == max_scroll;
    }

    /// First visible line when the console pane is scrolled to the bottom.
    pub fn max_console_scroll(&self, console_area: Rect) -> usize {
        // Block borders take one row top and bottom
        let visible = console_area.height.saturating_sub(2) as usize;
        self.console
            .scrollback()
            .line_count()
            .saturating_sub(visible.max(1))
    }

    /// Scroll the editor pane viewport without moving the cursor.
    pub fn handle_editor_scroll(&mut self, delta: i16, editor_area: Rect) {
        let (scroll_row, _scroll_col) = self.scroll_offset;

        let new_scroll_row = if delta > 0 {
            scroll_row.saturating_add(delta as usize)
        } else {
            scroll_row.saturating_sub((-delta) as usize)
        };

        let editor_height = editor_area.height.saturating_sub(2) as usize;
        let max_scroll = self.input.content.len().saturating_sub(editor_height.max(1));
        self.scroll_offset.0 = new_scroll_row.min(max_scroll);
    }

    /// Ensure the input cursor is inside the editor viewport, adjusting the
    /// scroll offset if needed. `inner` is the pane area without borders.
    pub fn ensure_input_cursor_visible(&mut self, inner: Rect) {
        let (row, col) = self.input.cursor_pos;
        let (scroll_row, scroll_col) = self.scroll_offset;

        let visible_rows = (inner.height as usize).max(1);
        if row < scroll_row {
            self.scroll_offset.0 = row;
        } else if row >= scroll_row + visible_rows {
            self.scroll_offset.0 = row.saturating_sub(visible_rows) + 1;
        }

        let line_number_width = if self.config.editor.show_line_numbers {
            self.input.line_number_width()
        } else {
            0
        };
        let visible_cols = (inner.width as usize)
            .saturating_sub(line_number_width)
            .max(1);

        if col < scroll_col {
            self.scroll_offset.1 = col;
        } else if col >= scroll_col + visible_cols {
            self.scroll_offset.1 = col.saturating_sub(visible_cols) + 1;
        }
    }
}
