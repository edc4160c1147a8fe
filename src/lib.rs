pub mod app;
pub mod background_image;
pub mod common;
pub mod gui;
pub mod keybindings;
pub mod logging;
pub mod settings;
