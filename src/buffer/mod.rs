//! # Input Buffer
//!
//! Text buffer backing the editor pane — the staging area for the command
//! being composed.
//!
//! ## What it does
//!
//! - Stores the draft command as lines in memory
//! - Tracks the cursor position
//! - Loads an initial script from a file and saves it back
//! - Swaps its whole content when history navigation replaces the draft
//!
//! Commands are usually a handful of lines, so a plain `Vec<String>` is
//! plenty.

use std::path::PathBuf;

#[derive(Clone)]
pub struct Buffer {
    pub content: Vec<String>,
    pub path: Option<PathBuf>,
    pub name: String,
    pub modified: bool,
    pub cursor_pos: (usize, usize), // (row, column)
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            content: vec![String::new()],
            path: None,
            name: String::from("scratch"),
            modified: false,
            cursor_pos: (0, 0),
        }
    }

    pub async fn from_path_async(path: PathBuf) -> std::io::Result<Self> {
        use tokio::fs;
        use tokio::io::{AsyncBufReadExt, BufReader};

        let file = fs::File::open(&path).await?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let mut content = Vec::new();
        while let Some(line) = lines.next_line().await? {
            content.push(line);
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_owned())
            .unwrap_or_else(|| "scratch".to_owned());

        Ok(Self {
            content: if content.is_empty() {
                vec![String::new()]
            } else {
                content
            },
            path: Some(path),
            name,
            modified: false,
            cursor_pos: (0, 0),
        })
    }

    /// Get buffer content as a string without intermediate allocations.
    pub fn content_as_string(&self) -> String {
        let total_chars: usize = self.content.iter().map(|line| line.len() + 1).sum();
        let mut result = String::with_capacity(total_chars.saturating_sub(1));

        for (i, line) in self.content.iter().enumerate() {
            result.push_str(line);
            if i < self.content.len() - 1 {
                result.push('\n');
            }
        }

        result
    }

    /// Replace the whole content and park the cursor at the end.
    ///
    /// Used when history navigation swaps the draft in or out.
    pub fn set_content(&mut self, text: &str) {
        self.content = text.split('\n').map(str::to_owned).collect();
        if self.content.is_empty() {
            self.content.push(String::new());
        }
        let last_row = self.content.len() - 1;
        self.cursor_pos = (last_row, self.content[last_row].len());
        self.modified = true;
    }

    /// Reset to a single empty line with the cursor at the origin.
    pub fn clear(&mut self) {
        self.content = vec![String::new()];
        self.cursor_pos = (0, 0);
        self.modified = false;
    }

    pub fn insert_char(&mut self, c: char) {
        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            self.content.push(String::new());
        }

        let line = &mut self.content[row];
        if col > line.len() {
            line.push_str(&" ".repeat(col - line.len()));
        }

        line.insert(col, c);
        self.cursor_pos.1 += 1;
        self.modified = true;
    }

    pub fn insert_newline(&mut self) {
        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            self.content.push(String::new());
            self.cursor_pos = (row + 1, 0);
            return;
        }

        if col < self.content[row].len() {
            // Split the line at the cursor
            let mut new_line = String::new();
            new_line.push_str(&self.content[row][col..]);
            self.content[row].truncate(col);
            self.content.insert(row + 1, new_line);
        } else {
            self.content.insert(row + 1, String::new());
        }

        self.cursor_pos = (row + 1, 0);
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        let (row, col) = self.cursor_pos;
        if col > 0 {
            let line = &mut self.content[row];
            line.remove(col - 1);
            self.cursor_pos.1 -= 1;
        } else if row > 0 {
            // Join with previous line
            let current_line = self.content.remove(row);
            let prev_line = &mut self.content[row - 1];
            let new_cursor_col = prev_line.len();
            prev_line.push_str(&current_line);
            self.cursor_pos = (row - 1, new_cursor_col);
        }
        self.modified = true;
    }

    pub fn delete(&mut self) {
        let (row, col) = self.cursor_pos;
        if row < self.content.len() {
            let line = &mut self.content[row];
            if col < line.len() {
                line.remove(col);
            } else if row + 1 < self.content.len() {
                // Join with next line
                let next_line = self.content.remove(row + 1);
                self.content[row].push_str(&next_line);
            }
            self.modified = true;
        }
    }

    /// Save buffer content to its associated file path asynchronously
    pub async fn save_async(&mut self) -> std::io::Result<()> {
        if let Some(path) = &self.path {
            self.save_to_path_async(path.clone()).await
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "No file path associated with buffer",
            ))
        }
    }

    /// Save buffer content to a specific path asynchronously
    pub async fn save_to_path_async(&mut self, path: PathBuf) -> std::io::Result<()> {
        use tokio::fs;
        use tokio::io::AsyncWriteExt;

        let content = self.content_as_string();
        let mut file = fs::File::create(&path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;

        self.modified = false;
        self.path = Some(path.clone());
        self.name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("scratch")
            .to_string();

        Ok(())
    }

    /// Check if the buffer has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.modified
    }

    pub fn move_cursor(&mut self, direction: CursorMovement) {
        let (mut row, mut col) = self.cursor_pos;

        match direction {
            CursorMovement::Up => {
                if row > 0 {
                    row -= 1;
                    let line = &self.content[row];
                    col = col.min(line.len());
                }
            }
            CursorMovement::Down => {
                if row + 1 < self.content.len() {
                    row += 1;
                    let line = &self.content[row];
                    col = col.min(line.len());
                }
            }
            CursorMovement::Left => {
                if col > 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = self.content[row].len();
                }
            }
            CursorMovement::Right => {
                let line = &self.content[row];
                if col < line.len() {
                    col += 1;
                } else if row + 1 < self.content.len() {
                    row += 1;
                    col = 0;
                }
            }
            CursorMovement::LineStart => {
                col = 0;
            }
            CursorMovement::LineEnd => {
                if row < self.content.len() {
                    col = self.content[row].len();
                }
            }
            CursorMovement::BufferStart => {
                row = 0;
                col = 0;
            }
            CursorMovement::BufferEnd => {
                if self.content.is_empty() {
                    row = 0;
                    col = 0;
                } else {
                    row = self.content.len() - 1;
                    col = self.content[row].len();
                }
            }
        }

        self.cursor_pos = (row, col);
    }

    /// Count the number of digits in a number
    pub fn count_digits(mut n: usize) -> usize {
        if n == 0 {
            return 1;
        }
        let mut digits = 0;
        while n > 0 {
            digits += 1;
            n /= 10;
        }
        digits
    }

    /// Get the width needed for the line number gutter.
    /// Always reserves space for at least 2 digits to prevent UI shifts.
    pub fn line_number_width(&self) -> usize {
        let total_lines = self.content.len().max(1);
        let calculated_width = Self::count_digits(total_lines);
        let min_width = 2;
        calculated_width.max(min_width) + 1 // +1 for spacing
    }
}

pub enum CursorMovement {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
}
