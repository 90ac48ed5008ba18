use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::console::Scrollback;

/// The read-only console pane: a viewport into the scrollback.
pub struct ConsolePane<'a> {
    pub scrollback: &'a Scrollback,
    /// First visible scrollback line
    pub scroll: usize,
    pub focused: bool,
}

impl<'a> ConsolePane<'a> {
    pub fn new(scrollback: &'a Scrollback) -> Self {
        Self {
            scrollback,
            scroll: 0,
            focused: false,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for ConsolePane<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(" console ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_area = block.inner(area);
        block.render(area, buf);

        let all_lines = self.scrollback.lines();
        let start = self.scroll.min(all_lines.len().saturating_sub(1));
        let end = (start + inner_area.height as usize).min(all_lines.len());

        let lines: Vec<Line> = all_lines[start..end]
            .iter()
            .map(|line| {
                if line.starts_with("error: ") {
                    Line::styled(line.as_str(), Style::default().fg(Color::Red))
                } else {
                    Line::raw(line.as_str())
                }
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).style(Style::default().fg(Color::White).bg(Color::Black));
        paragraph.render(inner_area, buf);
    }
}
