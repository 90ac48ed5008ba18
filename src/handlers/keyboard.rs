use crate::app::Pane;
use crate::console::Submission;
use crate::events::{AppEvent, EventBus};
use crate::input::layout;
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Keyboard handler that processes keyboard events
pub struct KeyboardHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl KeyboardHandler {
    /// Create a new keyboard handler
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to keyboard events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = KeyboardHandler::new(self.app_state.clone(), self.event_sender.clone());

        event_bus
            .subscribe_async("key_input", move |event| {
                let handler = handler.clone();
                async move { handler.handle_key_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Handle keyboard events
    async fn handle_key_event(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::KeyInput(key) = event {
            self.handle_key(key).await?;
        }

        Ok(())
    }

    async fn handle_key(&self, key: KeyEvent) -> Result<()> {
        // Key combinations first
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::CONTROL) => {
                // Submit the editor contents with Ctrl+Enter
                self.handle_submit().await?;
            }
            (KeyCode::Up, KeyModifiers::CONTROL) => {
                self.handle_history_previous().await?;
            }
            (KeyCode::Down, KeyModifiers::CONTROL) => {
                self.handle_history_next().await?;
            }
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                // Quit with Ctrl+Q
                self.event_sender.send(AppEvent::Quit)?;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                // Save the editor pane with Ctrl+S
                self.handle_save_command().await?;
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                let mut app = self.app_state.write().await;
                app.toggle_focus();
            }
            (KeyCode::Esc, _) => {
                // Back to the editor pane
                let mut app = self.app_state.write().await;
                app.focus = Pane::Editor;
            }
            (KeyCode::PageUp, _) => {
                self.handle_page_scroll(-1).await?;
            }
            (KeyCode::PageDown, _) => {
                self.handle_page_scroll(1).await?;
            }
            // Editor cursor movement
            (KeyCode::Up, KeyModifiers::NONE) => {
                self.handle_cursor_movement(crate::buffer::CursorMovement::Up)
                    .await?;
            }
            (KeyCode::Down, KeyModifiers::NONE) => {
                self.handle_cursor_movement(crate::buffer::CursorMovement::Down)
                    .await?;
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.handle_cursor_movement(crate::buffer::CursorMovement::Left)
                    .await?;
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.handle_cursor_movement(crate::buffer::CursorMovement::Right)
                    .await?;
            }
            (KeyCode::Home, modifiers) => {
                let movement = if modifiers.contains(KeyModifiers::CONTROL) {
                    crate::buffer::CursorMovement::BufferStart
                } else {
                    crate::buffer::CursorMovement::LineStart
                };
                self.handle_cursor_movement(movement).await?;
            }
            (KeyCode::End, modifiers) => {
                let movement = if modifiers.contains(KeyModifiers::CONTROL) {
                    crate::buffer::CursorMovement::BufferEnd
                } else {
                    crate::buffer::CursorMovement::LineEnd
                };
                self.handle_cursor_movement(movement).await?;
            }
            // Text input
            (KeyCode::Char(c), modifiers)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                self.handle_char_input(c).await?;
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                let mut app = self.app_state.write().await;
                app.input.insert_newline();
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                let mut app = self.app_state.write().await;
                app.input.backspace();
            }
            (KeyCode::Delete, KeyModifiers::NONE) => {
                let mut app = self.app_state.write().await;
                app.input.delete();
            }
            _ => {} // Ignore other key combinations
        }

        Ok(())
    }

    /// Stage a submission and dispatch the command to the execute
    /// collaborator in a spawned task. The completion re-enters the system
    /// as an `ExecutionFinished` event.
    async fn handle_submit(&self) -> Result<()> {
        let mut app = self.app_state.write().await;

        let input_text = app.input.content_as_string();
        let preprocess = app.backend.preprocess.clone();
        let outcome = app.console.submit(&input_text, |cmd| preprocess(cmd));

        match outcome {
            Submission::Dispatched(command) => {
                app.input.clear();
                app.scroll_offset = (0, 0);
                app.follow_output = true;
                app.clear_status_message();

                let execute = app.backend.execute.clone();
                drop(app);

                let sender = self.event_sender.clone();
                tokio::spawn(async move {
                    let result = match execute(command).await {
                        Ok(output) => Ok(Arc::from(output.as_str())),
                        Err(e) => Err(Arc::from(e.to_string().as_str())),
                    };
                    if sender.send(AppEvent::ExecutionFinished { result }).is_err() {
                        log::warn!("execution finished after the event bus closed");
                    }
                });
            }
            Submission::Empty => {
                // Whitespace-only input never reaches history or the backend
            }
            Submission::Busy => {
                drop(app);
                self.event_sender.send(AppEvent::StatusMessage {
                    message: "a command is still running".into(),
                })?;
            }
        }

        Ok(())
    }

    /// Replace the editor contents with the previous history entry
    async fn handle_history_previous(&self) -> Result<()> {
        let mut app = self.app_state.write().await;

        let current = app.input.content_as_string();
        if let Some(text) = app.console.navigate_previous(&current) {
            app.input.set_content(&text);
            app.scroll_offset = (0, 0);
        }

        Ok(())
    }

    /// Replace the editor contents with the next history entry, or restore
    /// the stashed draft past the newest entry
    async fn handle_history_next(&self) -> Result<()> {
        let mut app = self.app_state.write().await;

        let current = app.input.content_as_string();
        if let Some(text) = app.console.navigate_next(&current) {
            app.input.set_content(&text);
            app.scroll_offset = (0, 0);
        }

        Ok(())
    }

    /// Handle editor cursor movement
    async fn handle_cursor_movement(&self, movement: crate::buffer::CursorMovement) -> Result<()> {
        let mut app = self.app_state.write().await;
        app.input.move_cursor(movement);
        Ok(())
    }

    /// Handle character input into the editor pane
    async fn handle_char_input(&self, c: char) -> Result<()> {
        let mut app = self.app_state.write().await;
        app.input.insert_char(c);
        Ok(())
    }

    /// Scroll the focused pane by a page (direction -1 up, 1 down)
    async fn handle_page_scroll(&self, direction: i16) -> Result<()> {
        let area = terminal_area();

        let mut app = self.app_state.write().await;
        let areas = layout::console_layout(area, app.split_percent);

        match app.focus {
            Pane::Console => {
                let page = areas.console.height.saturating_sub(2).max(1) as i16;
                app.handle_console_scroll(direction * page, areas.console);
            }
            Pane::Editor => {
                let page = areas.editor.height.saturating_sub(2).max(1) as i16;
                app.handle_editor_scroll(direction * page, areas.editor);
            }
        }

        Ok(())
    }

    /// Save the editor pane to its file
    async fn handle_save_command(&self) -> Result<()> {
        let mut app = self.app_state.write().await;

        if app.input.path.is_none() {
            drop(app);
            self.event_sender.send(AppEvent::StatusMessage {
                message: "no file associated with the editor pane".into(),
            })?;
            return Ok(());
        }

        match app.input.save_async().await {
            Ok(()) => {
                let name = app.input.name.clone();
                drop(app);
                let saved_msg = format!("saved {}", name);
                self.event_sender.send(AppEvent::StatusMessage {
                    message: saved_msg.into(),
                })?;
            }
            Err(e) => {
                drop(app);
                let error_msg = format!("error saving file: {}", e);
                self.event_sender.send(AppEvent::StatusMessage {
                    message: error_msg.into(),
                })?;
            }
        }

        Ok(())
    }
}

/// Current terminal area, with a sensible fallback when the size is
/// unavailable (tests, detached terminals).
fn terminal_area() -> Rect {
    let (width, height) = ratatui::crossterm::terminal::size().unwrap_or((120, 30));
    Rect::new(0, 0, width, height)
}

impl Clone for KeyboardHandler {
    fn clone(&self) -> Self {
        Self {
            app_state: self.app_state.clone(),
            event_sender: self.event_sender.clone(),
        }
    }
}
