pub mod layout;
pub mod scroll;
