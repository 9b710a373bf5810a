pub mod handler;
pub mod keybindings;
