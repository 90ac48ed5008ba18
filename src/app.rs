use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, Event},
    Terminal,
};
use tokio::sync::RwLock;

use crate::buffer::Buffer;
use crate::config::{Config, ConfigManager};
use crate::console::Console;
use crate::events::EventBus;
use crate::exec::Backend;
use crate::handlers::{AppStateHandler, KeyboardHandler, MouseHandler};
use crate::input::layout;
use crate::input_system::InputSystem;
use crate::widgets::StatusBar;

/// Scrollback greeting, in the spirit of a login banner.
pub const WELCOME_BANNER: &str = "---- welcome to the console ----

Ctrl+Enter : run the editor contents
Ctrl+Up    : previous command
Ctrl+Down  : next command
Tab        : switch pane focus
Ctrl+Q     : quit

";

/// Which pane currently has focus
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pane {
    Editor,
    Console,
}

/// Contains global state that needs to be shared
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// Input buffer backing the editor pane
    pub input: Buffer,

    /// Command console state: history, stash, scrollback
    pub console: Console,

    /// Execute and preprocess collaborators
    pub backend: Backend,

    /// Loaded configuration
    pub config: Config,

    /// Scroll position for the editor pane
    pub scroll_offset: (usize, usize),

    /// First visible scrollback line in the console pane
    pub console_scroll: usize,

    /// Whether the console pane follows new output
    pub follow_output: bool,

    /// Editor pane share of the width, in percent
    pub split_percent: u16,

    /// Pane with input focus
    pub focus: Pane,

    /// Whether the divider is being dragged
    pub divider_drag: bool,

    /// Message to display on the status bar
    pub status_message: Option<String>,

    /// Status bar with slot-based system
    pub status_bar: StatusBar,

    /// Directory where user config is stored
    pub user_dir: PathBuf,
}

impl App {
    pub async fn new(backend: Backend) -> Self {
        let user_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("duet");

        // Create user directory if it doesn't exist
        if !user_dir.exists() {
            if let Err(e) = tokio::fs::create_dir_all(&user_dir).await {
                log::warn!("could not create user directory: {}", e);
            }
        }

        let config = Self::load_config(&user_dir);
        let mut console = Console::new(config.console.prompt.clone());
        console.greet(WELCOME_BANNER);

        let mut app = Self {
            running: true,
            input: Buffer::new(),
            console,
            backend,
            split_percent: layout::clamp_split_percent(config.console.split_percent),
            config,
            scroll_offset: (0, 0),
            console_scroll: 0,
            follow_output: true,
            focus: Pane::Editor,
            divider_drag: false,
            status_message: None,
            status_bar: StatusBar::new(),
            user_dir,
        };

        app.init_status_bar();
        app
    }

    /// Create the app with the editor pane preloaded from a file.
    pub async fn with_file(backend: Backend, file_path: &str) -> Result<Self> {
        let input = Buffer::from_path_async(PathBuf::from(file_path))
            .await
            .map_err(|e| anyhow!("Failed to open file '{}': {}", file_path, e))?;

        let mut app = Self::new(backend).await;
        app.input = input;
        Ok(app)
    }

    fn load_config(user_dir: &std::path::Path) -> Config {
        let mut manager = ConfigManager::new(user_dir);
        if let Err(e) = manager.load() {
            log::warn!("falling back to default config: {}", e);
        }
        manager.get_config().clone()
    }

    /// Run the application with the event-driven architecture
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<bool> {
        // Create shared app state
        let app_state = Arc::new(RwLock::new(std::mem::take(self)));

        // Create event bus and input system
        let event_bus = EventBus::new();
        let input_system = InputSystem::new(event_bus.clone());

        // Create and subscribe event handlers
        let keyboard_handler = KeyboardHandler::new(app_state.clone(), input_system.event_sender());
        let mouse_handler = MouseHandler::new(app_state.clone(), input_system.event_sender());
        let app_state_handler = AppStateHandler::new(app_state.clone());

        keyboard_handler.subscribe(&event_bus).await?;
        mouse_handler.subscribe(&event_bus).await?;
        app_state_handler.subscribe(&event_bus).await?;

        // Start event processing in background
        let event_bus_clone = event_bus.clone();
        tokio::spawn(async move {
            if let Err(e) = event_bus_clone.start_processing().await {
                log::error!("event processing error: {}", e);
            }
        });

        // Target frame rate
        let frame_duration = Duration::from_millis(16);
        let mut last_frame = Instant::now();

        // Main event loop
        loop {
            let frame_start = Instant::now();

            // Check if app should quit
            {
                let app = app_state.read().await;
                if !app.running {
                    break;
                }
            }

            // Draw the UI - limit to target frame rate
            if frame_start.duration_since(last_frame) >= frame_duration {
                let mut app = app_state.write().await;
                if let Err(e) = terminal.draw(|f| app.render(f)) {
                    log::error!("rendering error: {}", e);
                    break;
                }
                drop(app); // Release lock immediately after drawing
                last_frame = frame_start;
            }

            // Check for events without blocking to maintain frame rate
            if event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Err(e) = input_system.handle_key_input(key) {
                            log::error!("error handling key input: {}", e);
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Err(e) = input_system.handle_mouse_input(mouse) {
                            log::error!("error handling mouse input: {}", e);
                        }
                    }
                    Event::Resize(_, _) => {
                        // Pane areas are recomputed every frame
                    }
                    _ => {}
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        match Arc::try_unwrap(app_state) {
            Ok(app_mutex) => {
                *self = app_mutex.into_inner();
            }
            Err(app_state_arc) => {
                // Fallback if there are still references (shouldn't happen in normal operation)
                log::warn!("app state still has multiple references, using clone fallback");
                let app_guard = app_state_arc.read().await;
                *self = app_guard.clone();
            }
        }

        Ok(true)
    }

    /// Toggle focus between the two panes
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Editor => Pane::Console,
            Pane::Console => Pane::Editor,
        };
    }

    /// Set a status message
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Initialize the status bar with default slots
    pub fn init_status_bar(&mut self) {
        use crate::widgets::{SlotAlignment, StatusSlot};
        use ratatui::style::{Color, Style};

        // Input source slot (left side, high priority)
        let source_slot = StatusSlot::new("source", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(100)
            .with_style(Style::default().fg(Color::White).bg(Color::LightBlue));
        self.status_bar.set_slot(source_slot);

        // Cursor position slot (left side, medium priority)
        let cursor_slot = StatusSlot::new("cursor", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(90)
            .with_style(Style::default().fg(Color::White).bg(Color::LightBlue));
        self.status_bar.set_slot(cursor_slot);

        // Modified status slot (left side, medium priority)
        let modified_slot = StatusSlot::new("modified", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(80)
            .with_style(Style::default().fg(Color::White).bg(Color::LightBlue));
        self.status_bar.set_slot(modified_slot);

        // Transient message slot (center, when applicable)
        let message_slot = StatusSlot::new("message", "")
            .with_alignment(SlotAlignment::Center)
            .with_priority(70)
            .with_style(Style::default().fg(Color::Black).bg(Color::Yellow))
            .with_visibility(false); // Hidden until a message arrives
        self.status_bar.set_slot(message_slot);

        // Execution state slot (right side, high priority)
        let state_slot = StatusSlot::new("state", "READY")
            .with_alignment(SlotAlignment::Right)
            .with_priority(100)
            .with_style(Style::default().fg(Color::White).bg(Color::DarkGray));
        self.status_bar.set_slot(state_slot);

        // History count slot (right side, low priority)
        let history_slot = StatusSlot::new("history", "")
            .with_alignment(SlotAlignment::Right)
            .with_priority(60)
            .with_style(Style::default().fg(Color::Gray).bg(Color::LightBlue));
        self.status_bar.set_slot(history_slot);
    }

    /// Update status bar slots with current application state
    pub fn update_status_bar(&mut self) {
        let (row, col) = self.input.cursor_pos;

        self.status_bar.update_slot_content("source", &self.input.name);

        let cursor_info = format!("Ln {}, Col {}", row + 1, col + 1);
        self.status_bar.update_slot_content("cursor", cursor_info);

        let modified_text = if self.input.modified { "Unsaved" } else { "Saved" };
        self.status_bar.update_slot_content("modified", modified_text);

        if let Some(message) = &self.status_message {
            self.status_bar.update_slot_content("message", message.clone());
            self.status_bar.show_slot("message");
        } else {
            self.status_bar.hide_slot("message");
        }

        let state_text = if self.console.is_busy() {
            "RUNNING"
        } else {
            "READY"
        };
        self.status_bar.update_slot_content("state", state_text);

        let history_info = format!("{} cmds", self.console.history().len());
        self.status_bar.update_slot_content("history", history_info);
    }
}

// Make App cloneable for the event system fallback path in `run`.
impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            running: self.running,
            input: self.input.clone(),
            console: self.console.clone(),
            backend: self.backend.clone(),
            config: self.config.clone(),
            scroll_offset: self.scroll_offset,
            console_scroll: self.console_scroll,
            follow_output: self.follow_output,
            split_percent: self.split_percent,
            focus: self.focus,
            divider_drag: self.divider_drag,
            status_message: self.status_message.clone(),
            status_bar: self.status_bar.clone(),
            user_dir: self.user_dir.clone(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let mut console = Console::new(config.console.prompt.clone());
        console.greet(WELCOME_BANNER);

        let mut app = Self {
            running: true,
            input: Buffer::new(),
            console,
            backend: Backend::mock(),
            split_percent: layout::clamp_split_percent(config.console.split_percent),
            config,
            scroll_offset: (0, 0),
            console_scroll: 0,
            follow_output: true,
            focus: Pane::Editor,
            divider_drag: false,
            status_message: None,
            status_bar: StatusBar::new(),
            user_dir: PathBuf::from("."),
        };

        app.init_status_bar();
        app
    }
}
