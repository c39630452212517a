pub mod dialogs;
pub mod input;
pub mod render;
