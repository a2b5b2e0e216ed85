mod board;
mod game;
mod generator;
mod session;
mod settings;

pub use board::{BASE, CELL_COUNT, Cell, SIDE, SudokuBoard};
pub use game::{SudokuGame, SudokuLayout};
pub use generator::{GeneratedSudoku, cells_to_remove, generate_solution, generate_sudoku};
pub use session::{
    CheckOutcome, MSG_INCOMPLETE, MSG_NEW_GAME, MSG_SOLVED, StatusMessage, SudokuCommand,
    SudokuSession,
};
pub use settings::SudokuSettings;
