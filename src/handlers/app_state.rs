/// Application state handlers that respond to events
use crate::events::{AppEvent, EventBus};
use crate::App;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// App state handler that manages application state in response to events
pub struct AppStateHandler {
    app_state: Arc<RwLock<App>>,
}

impl AppStateHandler {
    /// Create a new app state handler
    pub fn new(app_state: Arc<RwLock<App>>) -> Self {
        Self { app_state }
    }

    /// Subscribe to all relevant events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = AppStateHandler::new(self.app_state.clone());

        // Subscribe to execution completions
        event_bus
            .subscribe_async("execution_finished", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_execution_finished(event).await }
                }
            })
            .await;

        // Subscribe to status messages
        event_bus
            .subscribe_async("status_message", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_status_message(event).await }
                }
            })
            .await;

        // Subscribe to quit events
        event_bus
            .subscribe_async("quit", {
                let handler = handler.clone();
                move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_quit(event).await }
                }
            })
            .await;

        Ok(())
    }

    /// Apply an execution result to the console: append the result (or an
    /// error entry) plus the prompt, and resume following the output.
    async fn handle_execution_finished(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::ExecutionFinished { result } = event {
            let mut app = self.app_state.write().await;

            let result = match result {
                Ok(output) => Ok(output.to_string()),
                Err(message) => Err(message.to_string()),
            };
            app.console.finish(result);
            app.follow_output = true;
        }

        Ok(())
    }

    /// Handle status message events
    async fn handle_status_message(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::StatusMessage { message } = event {
            let mut app = self.app_state.write().await;
            app.set_status_message(message.to_string());
        }

        Ok(())
    }

    /// Handle quit events
    async fn handle_quit(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::Quit = event {
            let mut app = self.app_state.write().await;
            app.running = false;
        }

        Ok(())
    }
}

impl Clone for AppStateHandler {
    fn clone(&self) -> Self {
        Self {
            app_state: self.app_state.clone(),
        }
    }
}
