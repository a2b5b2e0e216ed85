use std::collections::BTreeSet;

use glam::Vec2;

use crate::games::SessionRng;
use super::board::{Cell, SIDE, SudokuBoard};
use super::generator::generate_sudoku;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SudokuLayout {
    pub cell_size: f32,
    /// Top-left corner of the grid.
    pub origin: Vec2,
}

impl Default for SudokuLayout {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            origin: Vec2::new(175.0, 150.0),
        }
    }
}

impl SudokuLayout {
    pub fn grid_size(&self) -> f32 {
        self.cell_size * SIDE as f32
    }

    pub fn cell_at(&self, point: Vec2) -> Option<Cell> {
        let local = (point - self.origin) / self.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (row, col) = (local.y as usize, local.x as usize);
        (row < SIDE && col < SIDE).then_some((row, col))
    }

    pub fn cell_origin(&self, (row, col): Cell) -> Vec2 {
        self.origin + Vec2::new(col as f32, row as f32) * self.cell_size
    }
}

/// One puzzle: the player's board, the generated clues and the solution.
pub struct SudokuGame {
    board: SudokuBoard,
    original: SudokuBoard,
    solution: SudokuBoard,
    selected: Option<Cell>,
    layout: SudokuLayout,
    difficulty: f32,
}

impl SudokuGame {
    pub fn new(difficulty: f32, layout: SudokuLayout, rng: &mut SessionRng) -> Self {
        let generated = generate_sudoku(difficulty, rng);
        Self {
            board: generated.puzzle,
            original: generated.puzzle,
            solution: generated.solution,
            selected: None,
            layout,
            difficulty: difficulty.clamp(0.0, 1.0),
        }
    }

    pub fn from_boards(puzzle: SudokuBoard, solution: SudokuBoard, layout: SudokuLayout) -> Self {
        Self {
            board: puzzle,
            original: puzzle,
            solution,
            selected: None,
            layout,
            difficulty: 0.0,
        }
    }

    pub fn is_clue(&self, (row, col): Cell) -> bool {
        self.original.get(row, col) != 0
    }

    /// Selects the editable cell under `point`; anything else clears the selection.
    pub fn select(&mut self, point: Vec2) -> bool {
        self.selected = self
            .layout
            .cell_at(point)
            .filter(|&cell| !self.is_clue(cell));
        self.selected.is_some()
    }

    pub fn select_cell(&mut self, cell: Cell) -> bool {
        self.selected = (cell.0 < SIDE && cell.1 < SIDE && !self.is_clue(cell)).then_some(cell);
        self.selected.is_some()
    }

    /// Writes `digit` into the selected cell; `0` erases.
    pub fn place(&mut self, digit: u8) -> bool {
        if digit as usize > SIDE {
            return false;
        }
        match self.selected {
            Some(cell) if !self.is_clue(cell) => {
                self.board.set(cell.0, cell.1, digit);
                true
            }
            _ => false,
        }
    }

    pub fn check_solution(&self) -> BTreeSet<Cell> {
        self.board.check_solution()
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    pub fn board(&self) -> &SudokuBoard {
        &self.board
    }

    pub fn original(&self) -> &SudokuBoard {
        &self.original
    }

    pub fn solution(&self) -> &SudokuBoard {
        &self.solution
    }

    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    pub fn layout(&self) -> &SudokuLayout {
        &self.layout
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }
}
