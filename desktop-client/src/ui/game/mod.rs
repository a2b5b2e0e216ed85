mod game_ui;
mod jigsaw;
mod sidebar;
mod sliding_puzzle;
mod snake;
mod sudoku;

pub use game_ui::GameUi;
