pub mod editor;
pub mod status_bar;
pub mod terminal;

pub use editor::EditorPane;
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};
pub use terminal::ConsolePane;
