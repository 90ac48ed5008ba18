pub mod app_state;
pub mod keyboard;
pub mod mouse;

pub use app_state::AppStateHandler;
pub use keyboard::KeyboardHandler;
pub use mouse::MouseHandler;
