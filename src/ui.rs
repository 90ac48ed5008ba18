use crate::app::Pane;
use crate::input::layout;
use crate::widgets::{ConsolePane, EditorPane};
use crate::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        let areas = layout::console_layout(f.area(), self.split_percent);

        // Keep the editor viewport tracking the cursor
        let editor_inner = inner(areas.editor);
        self.ensure_input_cursor_visible(editor_inner);

        self.render_editor(f, areas.editor);
        self.render_divider(f, areas.divider);
        self.render_console(f, areas.console);
        self.render_status_line(f, areas.status);

        if self.focus == Pane::Editor {
            self.set_input_cursor(f, editor_inner);
        }
    }

    /// Render the editor pane
    fn render_editor(&mut self, f: &mut Frame, area: Rect) {
        let editor = EditorPane::new(&self.input)
            .scroll_offset(self.scroll_offset)
            .show_line_numbers(self.config.editor.show_line_numbers)
            .focused(self.focus == Pane::Editor);

        f.render_widget(editor, area);
    }

    /// Render the draggable divider column
    fn render_divider(&self, f: &mut Frame, area: Rect) {
        let divider = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(divider, area);
    }

    /// Render the console pane, following new output unless the user
    /// scrolled away
    fn render_console(&mut self, f: &mut Frame, area: Rect) {
        let max_scroll = self.max_console_scroll(area);
        if self.follow_output {
            self.console_scroll = max_scroll;
        } else {
            self.console_scroll = self.console_scroll.min(max_scroll);
        }

        let console = ConsolePane::new(self.console.scrollback())
            .scroll(self.console_scroll)
            .focused(self.focus == Pane::Console);

        f.render_widget(console, area);
    }

    /// Render the status line using the StatusBar widget
    fn render_status_line(&mut self, f: &mut Frame, area: Rect) {
        // Update status bar content before rendering
        self.update_status_bar();

        f.render_widget(self.status_bar.clone(), area);
    }

    /// Place the terminal cursor at the input cursor position
    fn set_input_cursor(&self, f: &mut Frame, inner: Rect) {
        let (row, col) = self.input.cursor_pos;
        let (scroll_row, scroll_col) = self.scroll_offset;

        let gutter = if self.config.editor.show_line_numbers {
            self.input.line_number_width() as u16
        } else {
            0
        };

        let cursor_x = col.saturating_sub(scroll_col) as u16 + gutter;
        let cursor_y = row.saturating_sub(scroll_row) as u16;

        // Only show the cursor while it is inside the viewport
        if cursor_y < inner.height && cursor_x < inner.width {
            f.set_cursor_position(Position::new(inner.x + cursor_x, inner.y + cursor_y));
        }
    }
}

/// Pane area without its one-cell border
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}
