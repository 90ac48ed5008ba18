//! Integration tests for the application state and core functionality
//!
//! Tests the App struct and the event-driven submit flow end-to-end.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::RwLock;

use console::events::EventBus;
use console::exec::{Backend, ExecuteFn, PreprocessFn};
use console::handlers::{AppStateHandler, KeyboardHandler};
use console::input_system::InputSystem;
use console::{App, Pane};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Backend that resolves instantly with a fixed output.
fn fixed_backend(output: &'static str) -> Backend {
    let execute: ExecuteFn = Arc::new(move |_cmd: String| {
        Box::pin(async move { Ok(output.to_string()) })
    });
    let preprocess: PreprocessFn = Arc::new(|cmd: &str| cmd.to_string());
    Backend::new(execute, preprocess)
}

/// Backend whose execute collaborator always fails.
fn failing_backend(message: &'static str) -> Backend {
    let execute: ExecuteFn = Arc::new(move |_cmd: String| {
        Box::pin(async move { Err(anyhow::anyhow!(message)) })
    });
    let preprocess: PreprocessFn = Arc::new(|cmd: &str| cmd.to_string());
    Backend::new(execute, preprocess)
}

/// Wire an app into the event system the way `App::run` does, minus the
/// terminal loop.
async fn wire(app: App) -> (Arc<RwLock<App>>, InputSystem) {
    let app_state = Arc::new(RwLock::new(app));

    let event_bus = EventBus::new();
    let input_system = InputSystem::new(event_bus.clone());

    let keyboard_handler = KeyboardHandler::new(app_state.clone(), input_system.event_sender());
    let app_state_handler = AppStateHandler::new(app_state.clone());
    keyboard_handler.subscribe(&event_bus).await.unwrap();
    app_state_handler.subscribe(&event_bus).await.unwrap();

    tokio::spawn(async move {
        let _ = event_bus.start_processing().await;
    });

    (app_state, input_system)
}

/// Poll until `predicate` holds or a couple of seconds pass.
async fn wait_for<F>(app_state: &Arc<RwLock<App>>, predicate: F)
where
    F: Fn(&App) -> bool,
{
    for _ in 0..200 {
        {
            let app = app_state.read().await;
            if predicate(&app) {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn test_app_creation() {
    let app = App::new(Backend::mock()).await;

    assert!(app.running);
    assert_eq!(app.focus, Pane::Editor);
    assert!(app.follow_output);
    assert_eq!(app.input.content_as_string(), "");
    assert!(app.console.history().is_empty());
    assert!(app.status_message.is_none());
    assert!(!app.divider_drag);

    // The scrollback opens with the banner and the first prompt
    assert!(app.console.scrollback().lines()[0].contains("welcome"));
    assert_eq!(
        app.console.scrollback().last_segment(),
        Some(app.console.prompt())
    );

    // Status bar is initialized with default slots
    assert!(app.status_bar.slot_count() > 0);
}

#[tokio::test]
async fn test_app_with_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("snippet.lua");
    fs::write(&file_path, "print('hi')\nprint('there')").unwrap();

    let app = App::with_file(Backend::mock(), file_path.to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(app.input.name, "snippet.lua");
    assert_eq!(app.input.content.len(), 2);
    assert_eq!(app.input.content[0], "print('hi')");
    assert!(!app.input.modified);
}

#[tokio::test]
async fn test_app_missing_file_fails() {
    let result = App::with_file(Backend::mock(), "/definitely/not/here.lua").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_toggle_focus() {
    let mut app = App::new(Backend::mock()).await;

    assert_eq!(app.focus, Pane::Editor);
    app.toggle_focus();
    assert_eq!(app.focus, Pane::Console);
    app.toggle_focus();
    assert_eq!(app.focus, Pane::Editor);
}

#[tokio::test]
async fn test_status_bar_reflects_state() {
    let mut app = App::new(Backend::mock()).await;

    for ch in "test".chars() {
        app.input.insert_char(ch);
    }
    app.input.cursor_pos = (0, 2);
    app.update_status_bar();

    let cursor_slot = app.status_bar.get_slot("cursor").unwrap();
    assert!(cursor_slot.content.contains("Ln 1, Col 3")); // 1-based indexing

    let modified_slot = app.status_bar.get_slot("modified").unwrap();
    assert!(modified_slot.content.contains("Unsaved"));

    let state_slot = app.status_bar.get_slot("state").unwrap();
    assert_eq!(state_slot.content, "READY");

    // A busy console flips the state slot
    app.console.submit("cmd", |c| c.to_string());
    app.update_status_bar();
    assert_eq!(app.status_bar.get_slot("state").unwrap().content, "RUNNING");

    // Messages surface in the center slot
    app.set_status_message("saved".to_string());
    app.update_status_bar();
    let message_slot = app.status_bar.get_slot("message").unwrap();
    assert!(message_slot.visible);
    assert_eq!(message_slot.content, "saved");
}

#[tokio::test]
async fn test_submit_flow_appends_result_and_prompt() {
    let app = App::new(fixed_backend("42")).await;
    let (app_state, input_system) = wire(app).await;

    {
        let mut app = app_state.write().await;
        app.input.set_content("6*7");
    }

    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL))
        .unwrap();

    wait_for(&app_state, |app| {
        !app.console.is_busy() && app.console.scrollback().last_segment() == Some("\n$ ")
    })
    .await;

    let app = app_state.read().await;
    assert_eq!(app.console.history(), &["6*7"]);
    assert_eq!(app.input.content_as_string(), "");

    let segments = app.console.scrollback().segments();
    let n = segments.len();
    assert_eq!(segments[n - 3], "6*7\n");
    assert_eq!(segments[n - 2], "42");
    assert_eq!(segments[n - 1], "\n$ ");
}

#[tokio::test]
async fn test_submit_flow_surfaces_execution_errors() {
    let app = App::new(failing_backend("backend down")).await;
    let (app_state, input_system) = wire(app).await;

    {
        let mut app = app_state.write().await;
        app.input.set_content("anything");
    }

    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL))
        .unwrap();

    wait_for(&app_state, |app| {
        !app.console.is_busy() && app.console.scrollback().last_segment() == Some("\n$ ")
    })
    .await;

    let app = app_state.read().await;
    let segments = app.console.scrollback().segments();
    let n = segments.len();
    assert_eq!(segments[n - 2], "error: backend down");
    assert_eq!(segments[n - 1], "\n$ ");
    // The failed command is still part of history
    assert_eq!(app.console.history(), &["anything"]);
}

#[tokio::test]
async fn test_empty_submit_flow_is_a_no_op() {
    let app = App::new(fixed_backend("unused")).await;
    let (app_state, input_system) = wire(app).await;

    let scrollback_len = {
        let app = app_state.read().await;
        app.console.scrollback().total_len()
    };

    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let app = app_state.read().await;
    assert!(app.console.history().is_empty());
    assert_eq!(app.console.scrollback().total_len(), scrollback_len);
    assert!(!app.console.is_busy());
}

#[tokio::test]
async fn test_history_navigation_via_key_events() {
    let app = App::new(fixed_backend("ok")).await;
    let (app_state, input_system) = wire(app).await;

    for cmd in ["alpha", "beta"] {
        {
            let mut app = app_state.write().await;
            app.input.set_content(cmd);
        }
        input_system
            .handle_key_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL))
            .unwrap();
        wait_for(&app_state, |app| {
            !app.console.is_busy() && app.console.history().last().map(String::as_str) == Some(cmd)
        })
        .await;
    }

    // Type a draft, then browse back through history
    {
        let mut app = app_state.write().await;
        app.input.set_content("draft");
    }
    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL))
        .unwrap();
    wait_for(&app_state, |app| app.input.content_as_string() == "beta").await;

    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL))
        .unwrap();
    wait_for(&app_state, |app| app.input.content_as_string() == "alpha").await;

    // Forward past the newest entry restores the draft
    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL))
        .unwrap();
    wait_for(&app_state, |app| app.input.content_as_string() == "beta").await;

    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL))
        .unwrap();
    wait_for(&app_state, |app| app.input.content_as_string() == "draft").await;
}

#[tokio::test]
async fn test_quit_key_stops_the_app() {
    let app = App::new(Backend::mock()).await;
    let (app_state, input_system) = wire(app).await;

    input_system
        .handle_key_input(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
        .unwrap();

    wait_for(&app_state, |app| !app.running).await;
}

#[tokio::test]
async fn test_app_clone_and_default() {
    let app = App::new(Backend::mock()).await;
    let cloned = app.clone();

    assert_eq!(cloned.running, app.running);
    assert_eq!(cloned.split_percent, app.split_percent);
    assert_eq!(
        cloned.console.scrollback().total_len(),
        app.console.scrollback().total_len()
    );

    let default_app = App::default();
    assert!(default_app.running);
    assert!(default_app.status_bar.slot_count() > 0);
}
