use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, ValueEnum)]
pub enum GameType {
    Sliding,
    Jigsaw,
    Snake,
    Sudoku,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        GameType::Sliding,
        GameType::Jigsaw,
        GameType::Snake,
        GameType::Sudoku,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GameType::Sliding => "Sliding Puzzle",
            GameType::Jigsaw => "Jigsaw Puzzle",
            GameType::Snake => "Snake Game",
            GameType::Sudoku => "Sudoku Puzzle",
        }
    }
}
