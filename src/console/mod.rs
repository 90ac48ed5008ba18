//! # Command Console State Machine
//!
//! Core state for the console: command history, history navigation, and
//! output append semantics.
//!
//! ## What it does
//!
//! - Records submitted commands in an append-only history
//! - Browses history with a navigation cursor while stashing the draft
//!   the user was composing
//! - Echoes commands and appends execution results to the scrollback
//! - Serializes executions with a single-slot busy flag
//!
//! ## Structure
//!
//! All state lives in explicit fields of [`Console`], owned by the app and
//! mutated through the event handlers. A submission happens in two steps:
//! [`Console::submit`] echoes the command, records history and marks the
//! console busy; [`Console::finish`] applies the execution result when the
//! spawned task completes.

mod scrollback;

pub use scrollback::Scrollback;

/// Outcome of staging a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The preprocessed command, ready for the execute collaborator.
    Dispatched(String),
    /// Input was empty after trimming; nothing was changed.
    Empty,
    /// An execution is already outstanding; the input was left untouched.
    Busy,
}

/// Command console state: history, navigation, stash and scrollback.
#[derive(Debug, Clone)]
pub struct Console {
    /// Submitted commands, insertion order, duplicates allowed.
    history: Vec<String>,
    /// Index into `history` in `[0, history.len()]`; `history.len()` means
    /// "live edit, not navigating".
    cursor: usize,
    /// Draft captured when a navigation session starts; `None` while not
    /// navigating.
    stash: Option<String>,
    /// Append-only output log.
    scrollback: Scrollback,
    /// Appended after each result.
    prompt: String,
    /// Set while an execution is outstanding.
    busy: bool,
}

impl Console {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            history: Vec::new(),
            cursor: 0,
            stash: None,
            scrollback: Scrollback::new(),
            prompt: prompt.into(),
            busy: false,
        }
    }

    /// Append the welcome banner and the first prompt to the scrollback.
    pub fn greet(&mut self, banner: &str) {
        self.scrollback.append(banner);
        let prompt = self.prompt.clone();
        self.scrollback.append(&prompt);
    }

    /// Stage a submission from the current input text.
    ///
    /// Trims the input; whitespace-only submissions are a complete no-op.
    /// Otherwise the command is preprocessed, echoed to the scrollback, and
    /// the ORIGINAL trimmed command is recorded in history. The cursor moves
    /// to the live-edit position, the stash is cleared and the console
    /// becomes busy until [`Console::finish`] is called.
    pub fn submit(&mut self, input: &str, preprocess: impl Fn(&str) -> String) -> Submission {
        if self.busy {
            return Submission::Busy;
        }

        let command = input.trim();
        if command.is_empty() {
            return Submission::Empty;
        }

        let dispatched = preprocess(command);
        self.scrollback.append(&format!("{}\n", dispatched));

        self.history.push(command.to_string());
        self.cursor = self.history.len();
        self.stash = None;
        self.busy = true;

        Submission::Dispatched(dispatched)
    }

    /// Apply the completion of the in-flight execution.
    ///
    /// Failures are rendered as a distinguishable `error:` entry; the prompt
    /// is re-appended either way.
    pub fn finish(&mut self, result: Result<String, String>) {
        let text = match result {
            Ok(output) => output,
            Err(message) => format!("error: {}", message),
        };
        self.scrollback.append(&text);
        let trailer = format!("\n{}", self.prompt);
        self.scrollback.append(&trailer);
        self.busy = false;
    }

    /// Move one entry back in history.
    ///
    /// Captures `current_input` into the stash when no navigation session is
    /// active. Returns the replacement input text, or `None` when history is
    /// empty or the cursor is already at the oldest entry.
    pub fn navigate_previous(&mut self, current_input: &str) -> Option<String> {
        if self.stash.is_none() {
            self.stash = Some(current_input.to_string());
        }

        if self.history.is_empty() || self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        Some(self.history[self.cursor].clone())
    }

    /// Move one entry forward in history.
    ///
    /// Same stash-capture rule as [`Console::navigate_previous`]. Past the
    /// newest entry the stashed draft is restored and the cursor stays where
    /// it is.
    pub fn navigate_next(&mut self, current_input: &str) -> Option<String> {
        if self.stash.is_none() {
            self.stash = Some(current_input.to_string());
        }

        if !self.history.is_empty() && self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            Some(self.history[self.cursor].clone())
        } else {
            self.stash.clone()
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stash(&self) -> Option<&str> {
        self.stash.as_deref()
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}
