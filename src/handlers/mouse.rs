/// Mouse input handlers that subscribe to mouse events
use crate::app::Pane;
use crate::events::{AppEvent, EventBus};
use crate::input::layout::{self, Hit};
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Mouse handler that processes mouse events
pub struct MouseHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl MouseHandler {
    /// Create a new mouse handler
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to mouse events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = MouseHandler::new(self.app_state.clone(), self.event_sender.clone());

        event_bus
            .subscribe_async("mouse_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_mouse_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Handle mouse events
    async fn handle_mouse_event(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::MouseInput(mouse) = event {
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.handle_click(mouse.column, mouse.row).await?;
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    self.handle_drag(mouse.column).await?;
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    let mut app = self.app_state.write().await;
                    app.divider_drag = false;
                }
                MouseEventKind::ScrollUp => {
                    self.handle_scroll(-3, mouse.column, mouse.row).await?;
                }
                MouseEventKind::ScrollDown => {
                    self.handle_scroll(3, mouse.column, mouse.row).await?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Focus the clicked pane; clicking the divider starts a resize drag,
    /// clicking inside the editor also repositions the cursor.
    async fn handle_click(&self, mouse_x: u16, mouse_y: u16) -> Result<()> {
        let area = terminal_area();
        let mut app = self.app_state.write().await;

        match layout::hit_test(area, app.split_percent, mouse_x, mouse_y) {
            Some(Hit::Divider) => {
                app.divider_drag = true;
            }
            Some(Hit::Editor) => {
                app.focus = Pane::Editor;
                let editor = layout::console_layout(area, app.split_percent).editor;
                Self::position_cursor(&mut app, editor, mouse_x, mouse_y);
            }
            Some(Hit::Console) => {
                app.focus = Pane::Console;
            }
            _ => {}
        }

        Ok(())
    }

    /// Move the divider while a resize drag is active
    async fn handle_drag(&self, mouse_x: u16) -> Result<()> {
        let area = terminal_area();
        let mut app = self.app_state.write().await;

        if app.divider_drag {
            app.split_percent = layout::split_percent_at(area, mouse_x);
        }

        Ok(())
    }

    /// Scroll the pane under the pointer
    async fn handle_scroll(&self, delta: i16, mouse_x: u16, mouse_y: u16) -> Result<()> {
        let area = terminal_area();
        let mut app = self.app_state.write().await;
        let areas = layout::console_layout(area, app.split_percent);

        match layout::hit_test(area, app.split_percent, mouse_x, mouse_y) {
            Some(Hit::Console) => {
                app.handle_console_scroll(delta, areas.console);
            }
            Some(Hit::Editor) => {
                app.handle_editor_scroll(delta, areas.editor);
            }
            _ => {}
        }

        Ok(())
    }

    /// Convert a click inside the editor pane to a buffer cursor position
    fn position_cursor(app: &mut App, editor_area: Rect, mouse_x: u16, mouse_y: u16) {
        // Account for the pane border
        let inner_x = editor_area.x + 1;
        let inner_y = editor_area.y + 1;
        if mouse_x < inner_x || mouse_y < inner_y {
            return;
        }

        let gutter = if app.config.editor.show_line_numbers {
            app.input.line_number_width() as u16
        } else {
            0
        };

        let (scroll_row, scroll_col) = app.scroll_offset;
        let row = (mouse_y - inner_y) as usize + scroll_row;
        let col = (mouse_x - inner_x).saturating_sub(gutter) as usize + scroll_col;

        let row = row.min(app.input.content.len().saturating_sub(1));
        let col = col.min(app.input.content[row].len());
        app.input.cursor_pos = (row, col);
    }
}

/// Current terminal area, with a sensible fallback when the size is
/// unavailable (tests, detached terminals).
fn terminal_area() -> Rect {
    let (width, height) = ratatui::crossterm::terminal::size().unwrap_or((120, 30));
    Rect::new(0, 0, width, height)
}

impl Clone for MouseHandler {
    fn clone(&self) -> Self {
        Self {
            app_state: self.app_state.clone(),
            event_sender: self.event_sender.clone(),
        }
    }
}
