use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use std::collections::HashMap;

/// Represents the alignment of a status bar slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotAlignment {
    Left,
    Center,
    Right,
}

/// Represents a single slot in the status bar
#[derive(Debug, Clone)]
pub struct StatusSlot {
    pub id: String,
    pub content: String,
    pub alignment: SlotAlignment,
    pub priority: u8, // Higher priority = shown first within alignment group
    pub style: Style,
    pub visible: bool,
}

impl StatusSlot {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            alignment: SlotAlignment::Left,
            priority: 50, // Default medium priority
            style: Style::default().fg(Color::White).bg(Color::LightBlue),
            visible: true,
        }
    }

    pub fn with_alignment(mut self, alignment: SlotAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Status bar widget with a slot-based system
#[derive(Clone)]
pub struct StatusBar {
    slots: HashMap<String, StatusSlot>,
    background_style: Style,
    separator: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            background_style: Style::default().bg(Color::LightBlue).fg(Color::White),
            separator: " | ".to_string(),
        }
    }

    /// Add or update a slot in the status bar
    pub fn set_slot(&mut self, slot: StatusSlot) {
        self.slots.insert(slot.id.clone(), slot);
    }

    /// Remove a slot from the status bar
    pub fn remove_slot(&mut self, id: &str) {
        self.slots.remove(id);
    }

    /// Get a reference to a slot
    pub fn get_slot(&self, id: &str) -> Option<&StatusSlot> {
        self.slots.get(id)
    }

    /// Hide a slot without removing it
    pub fn hide_slot(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.visible = false;
        }
    }

    /// Show a previously hidden slot
    pub fn show_slot(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.visible = true;
        }
    }

    /// Update the content of a slot
    pub fn update_slot_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.content = content.into();
        }
    }

    /// Number of registered slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Visible, non-empty slots for one alignment group, highest priority
    /// first
    fn group(&self, alignment: SlotAlignment) -> Vec<&StatusSlot> {
        let mut slots: Vec<&StatusSlot> = self
            .slots
            .values()
            .filter(|s| s.visible && !s.content.is_empty() && s.alignment == alignment)
            .collect();
        slots.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
        slots
    }

    /// Rendered width of a group: slot contents plus separators
    fn group_width(&self, slots: &[&StatusSlot]) -> usize {
        if slots.is_empty() {
            return 0;
        }
        let content: usize = slots.iter().map(|s| s.content.len() + 2).sum();
        content + self.separator.len() * (slots.len() - 1)
    }

    fn render_group(&self, slots: &[&StatusSlot], mut x: u16, area: Rect, buf: &mut TuiBuffer) {
        for (i, slot) in slots.iter().enumerate() {
            if i > 0 {
                let remaining = (area.x + area.width).saturating_sub(x) as usize;
                buf.set_stringn(x, area.y, &self.separator, remaining, self.background_style);
                x = x.saturating_add(self.separator.len() as u16);
            }

            let text = format!(" {} ", slot.content);
            let remaining = (area.x + area.width).saturating_sub(x) as usize;
            if remaining == 0 {
                break;
            }
            buf.set_stringn(x, area.y, &text, remaining, slot.style);
            x = x.saturating_add(text.len() as u16);
        }
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        buf.set_style(area, self.background_style);

        let left = self.group(SlotAlignment::Left);
        let center = self.group(SlotAlignment::Center);
        let right = self.group(SlotAlignment::Right);

        self.render_group(&left, area.x, area, buf);

        let center_width = self.group_width(&center) as u16;
        if center_width > 0 && center_width <= area.width {
            let x = area.x + (area.width - center_width) / 2;
            self.render_group(&center, x, area, buf);
        }

        let right_width = self.group_width(&right) as u16;
        if right_width > 0 && right_width <= area.width {
            let x = area.x + area.width - right_width;
            self.render_group(&right, x, area, buf);
        }
    }
}
