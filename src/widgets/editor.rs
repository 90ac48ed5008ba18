use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::buffer::Buffer;

/// The editor pane: where the next command is composed.
pub struct EditorPane<'a> {
    pub buffer: &'a Buffer,
    pub scroll_offset: (usize, usize), // (row, col) offset for viewport scrolling
    pub show_line_numbers: bool,
    pub focused: bool,
}

impl<'a> EditorPane<'a> {
    pub fn new(buffer: &'a Buffer) -> Self {
        Self {
            buffer,
            scroll_offset: (0, 0),
            show_line_numbers: true,
            focused: true,
        }
    }

    pub fn scroll_offset(mut self, scroll_offset: (usize, usize)) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(" editor ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_area = block.inner(area);
        block.render(area, buf);

        // Determine visible portion of the buffer
        let start_row = self.scroll_offset.0;
        let end_row = (start_row + inner_area.height as usize).min(self.buffer.content.len());
        let h_offset = self.scroll_offset.1;

        let line_number_width = if self.show_line_numbers {
            self.buffer.line_number_width()
        } else {
            0
        };

        // Render visible lines
        let mut lines = Vec::new();

        for i in start_row..end_row {
            let line = &self.buffer.content[i];

            // Extract the visible portion of the line without cloning
            let visible_content = if h_offset < line.len() {
                &line[h_offset..]
            } else {
                ""
            };

            if self.show_line_numbers {
                let line_num = i + 1; // 1-indexed line numbers
                let line_num_str = format!("{:>width$}", line_num, width = line_number_width - 1);

                lines.push(Line::from(vec![
                    Span::styled(line_num_str, Style::default().fg(Color::Rgb(100, 100, 120))),
                    Span::raw(" "), // Separator
                    Span::raw(visible_content),
                ]));
            } else {
                lines.push(Line::from(visible_content));
            }
        }

        let paragraph =
            Paragraph::new(lines).style(Style::default().fg(Color::White).bg(Color::Black));
        paragraph.render(inner_area, buf);
    }
}
