//! Execution collaborators for the console.
//!
//! The console never runs commands itself; it dispatches them to an
//! asynchronous execute collaborator and rewrites them first through a
//! synchronous preprocess collaborator. Both are caller-supplied. The mock
//! backend shipped with the binary echoes commands and answers a couple of
//! canned inputs.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;

/// Asynchronous execute collaborator: command in, display text out.
pub type ExecuteFn = Arc<dyn Fn(String) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// Synchronous, pure command rewrite applied before dispatch.
pub type PreprocessFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The pair of collaborators a console runs against.
#[derive(Clone)]
pub struct Backend {
    pub execute: ExecuteFn,
    pub preprocess: PreprocessFn,
}

impl Backend {
    pub fn new(execute: ExecuteFn, preprocess: PreprocessFn) -> Self {
        Self {
            execute,
            preprocess,
        }
    }

    /// Mock backend for the playground binary: echoes the command back after
    /// a short artificial delay, with canned answers for `help` and
    /// `version`.
    pub fn mock() -> Self {
        let execute: ExecuteFn = Arc::new(|command: String| {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(150)).await;
                let output = match command.as_str() {
                    "help" => "commands run against a mock backend; \
                               anything you type is echoed back"
                        .to_string(),
                    "version" => format!("duet {}", env!("CARGO_PKG_VERSION")),
                    _ => format!("echo: {}", command),
                };
                Ok(output)
            })
        });

        // collapse internal whitespace so multi-line commands echo on one line
        let preprocess: PreprocessFn =
            Arc::new(|command: &str| command.split_whitespace().collect::<Vec<_>>().join(" "));

        Self::new(execute, preprocess)
    }
}
