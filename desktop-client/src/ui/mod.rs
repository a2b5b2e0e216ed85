mod game;
mod menu;
mod widgets;

pub use menu::MenuApp;
