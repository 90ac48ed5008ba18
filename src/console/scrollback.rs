//! Append-only scrollback for the console pane.
//!
//! The scrollback is a growing log of text segments. Segments are spliced
//! into a line view for rendering, but the log itself is never rewritten,
//! only appended to.

/// Append-only output log backing the console pane.
#[derive(Debug, Clone)]
pub struct Scrollback {
    /// Every segment ever appended, in order.
    segments: Vec<String>,
    /// Line view of the appended text, maintained incrementally.
    lines: Vec<String>,
    /// Total bytes appended. Monotonically non-decreasing.
    total_len: usize,
}

impl Scrollback {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            lines: vec![String::new()],
            total_len: 0,
        }
    }

    /// Append a segment and splice it into the line view.
    pub fn append(&mut self, text: &str) {
        self.segments.push(text.to_string());
        self.total_len += text.len();

        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            // `lines` always holds at least one entry
            self.lines
                .last_mut()
                .expect("scrollback line view is never empty")
                .push_str(first);
        }
        for part in parts {
            self.lines.push(part.to_string());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Total bytes ever appended.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for Scrollback {
    fn default() -> Self {
        Self::new()
    }
}
