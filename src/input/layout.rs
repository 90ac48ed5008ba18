/// Pane geometry for the two-pane layout.
///
/// Pure functions so mouse handlers and rendering agree on where the panes
/// are without sharing state.
use ratatui::layout::Rect;

/// Width of the draggable divider column between the panes.
pub const DIVIDER_WIDTH: u16 = 1;

/// The divider cannot be dragged past these bounds.
pub const MIN_SPLIT_PERCENT: u16 = 20;
pub const MAX_SPLIT_PERCENT: u16 = 80;

/// Screen regions of the console layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    pub editor: Rect,
    pub divider: Rect,
    pub console: Rect,
    pub status: Rect,
}

/// Region under a screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Editor,
    Divider,
    Console,
    Status,
}

/// Clamp the editor share of the width to the draggable range.
pub fn clamp_split_percent(percent: u16) -> u16 {
    percent.clamp(MIN_SPLIT_PERCENT, MAX_SPLIT_PERCENT)
}

/// Split `area` into editor pane, divider column, console pane and status
/// line. `split_percent` is the editor share of the body width.
pub fn console_layout(area: Rect, split_percent: u16) -> PaneAreas {
    let status_height = 1u16.min(area.height);
    let body_height = area.height.saturating_sub(status_height);

    let body_width = area.width.saturating_sub(DIVIDER_WIDTH);
    let editor_width =
        (u32::from(body_width) * u32::from(clamp_split_percent(split_percent)) / 100) as u16;
    let console_width = body_width.saturating_sub(editor_width);

    let editor = Rect::new(area.x, area.y, editor_width, body_height);
    let divider = Rect::new(
        area.x + editor_width,
        area.y,
        DIVIDER_WIDTH.min(area.width.saturating_sub(editor_width)),
        body_height,
    );
    let console = Rect::new(
        area.x + editor_width + divider.width,
        area.y,
        console_width,
        body_height,
    );
    let status = Rect::new(
        area.x,
        area.y + body_height,
        area.width,
        status_height,
    );

    PaneAreas {
        editor,
        divider,
        console,
        status,
    }
}

/// Editor split percent that puts the divider at screen column `x`.
pub fn split_percent_at(area: Rect, x: u16) -> u16 {
    let body_width = area.width.saturating_sub(DIVIDER_WIDTH);
    if body_width == 0 {
        return MIN_SPLIT_PERCENT;
    }
    let offset = x.saturating_sub(area.x).min(body_width);
    let percent = (u32::from(offset) * 100 / u32::from(body_width)) as u16;
    clamp_split_percent(percent)
}

/// Which region is under (`x`, `y`), if any.
pub fn hit_test(area: Rect, split_percent: u16, x: u16, y: u16) -> Option<Hit> {
    let areas = console_layout(area, split_percent);

    let contains = |r: Rect| {
        x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
    };

    if contains(areas.divider) {
        Some(Hit::Divider)
    } else if contains(areas.editor) {
        Some(Hit::Editor)
    } else if contains(areas.console) {
        Some(Hit::Console)
    } else if contains(areas.status) {
        Some(Hit::Status)
    } else {
        None
    }
}
