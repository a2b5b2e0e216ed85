use std::collections::BTreeSet;

pub const BASE: usize = 3;
pub const SIDE: usize = BASE * BASE;
pub const CELL_COUNT: usize = SIDE * SIDE;

pub type Cell = (usize, usize);

/// 9×9 digits, `0` meaning empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SudokuBoard {
    cells: [[u8; SIDE]; SIDE],
}

impl Default for SudokuBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl SudokuBoard {
    pub const fn empty() -> Self {
        Self {
            cells: [[0; SIDE]; SIDE],
        }
    }

    pub fn from_rows(cells: [[u8; SIDE]; SIDE]) -> Result<Self, String> {
        for (row, values) in cells.iter().enumerate() {
            if let Some(col) = values.iter().position(|&v| v as usize > SIDE) {
                return Err(format!(
                    "Digit at ({}, {}) must be between 0 and {}, got {}",
                    row, col, SIDE, values[col]
                ));
            }
        }
        Ok(Self { cells })
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.cells[row][col] = digit;
    }

    pub fn rows(&self) -> &[[u8; SIDE]; SIDE] {
        &self.cells
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|&d| d != 0)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&d| d != 0).count()
    }

    /// `true` when `digit` appears nowhere else in the row, column or box of
    /// `(row, col)`. The cell itself is not consulted.
    pub fn is_valid_move(&self, row: usize, col: usize, digit: u8) -> bool {
        houses_of(row, col)
            .flatten()
            .filter(|&cell| cell != (row, col))
            .all(|(r, c)| self.cells[r][c] != digit)
    }

    /// Cells in conflict: repeated digits within a row, column or box (every
    /// occurrence after the first) plus any filled cell that fails
    /// `is_valid_move` against the rest of the board. Empty for a correct board.
    pub fn check_solution(&self) -> BTreeSet<Cell> {
        let mut incorrect = BTreeSet::new();

        for house in all_houses() {
            let mut seen = [false; SIDE + 1];
            for (row, col) in house {
                let digit = self.cells[row][col] as usize;
                if digit == 0 {
                    continue;
                }
                if seen[digit] {
                    incorrect.insert((row, col));
                }
                seen[digit] = true;
            }
        }

        for row in 0..SIDE {
            for col in 0..SIDE {
                let digit = self.cells[row][col];
                if digit != 0 && !self.is_valid_move(row, col, digit) {
                    incorrect.insert((row, col));
                }
            }
        }

        incorrect
    }
}

fn row_cells(row: usize) -> [Cell; SIDE] {
    std::array::from_fn(|col| (row, col))
}

fn col_cells(col: usize) -> [Cell; SIDE] {
    std::array::from_fn(|row| (row, col))
}

fn box_cells(index: usize) -> [Cell; SIDE] {
    let top = (index / BASE) * BASE;
    let left = (index % BASE) * BASE;
    std::array::from_fn(|i| (top + i / BASE, left + i % BASE))
}

fn houses_of(row: usize, col: usize) -> impl Iterator<Item = [Cell; SIDE]> {
    [
        row_cells(row),
        col_cells(col),
        box_cells((row / BASE) * BASE + col / BASE),
    ]
    .into_iter()
}

fn all_houses() -> impl Iterator<Item = [Cell; SIDE]> {
    (0..SIDE)
        .map(row_cells)
        .chain((0..SIDE).map(col_cells))
        .chain((0..SIDE).map(box_cells))
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::test_boards::solved;

    #[test]
    fn test_solved_board_has_no_conflicts() {
        let board = solved();
        assert!(board.is_complete());
        assert!(board.check_solution().is_empty());
    }

    #[test]
    fn test_is_valid_move_ignores_own_cell() {
        let board = solved();
        assert!(board.is_valid_move(0, 0, 5));
        assert!(!board.is_valid_move(0, 0, 3));
    }

    #[test]
    fn test_is_valid_move_checks_box() {
        let mut board = SudokuBoard::empty();
        board.set(1, 1, 7);
        assert!(!board.is_valid_move(2, 2, 7));
        assert!(board.is_valid_move(3, 3, 7));
    }

    #[test]
    fn test_duplicate_in_row_reported() {
        let mut board = SudokuBoard::empty();
        board.set(4, 0, 9);
        board.set(4, 8, 9);
        let incorrect = board.check_solution();
        assert!(incorrect.contains(&(4, 8)));
        assert!(incorrect.contains(&(4, 0)));
    }

    #[test]
    fn test_swapped_digits_flagged() {
        let mut board = solved();
        board.set(0, 0, 3);
        board.set(0, 1, 5);
        let incorrect = board.check_solution();
        assert!(incorrect.contains(&(0, 0)));
        assert!(incorrect.contains(&(0, 1)));
    }

    #[test]
    fn test_empty_board_is_not_complete() {
        let board = SudokuBoard::empty();
        assert!(!board.is_complete());
        assert!(board.check_solution().is_empty());
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_from_rows_rejects_out_of_range_digit() {
        let mut rows = [[0; SIDE]; SIDE];
        rows[2][3] = 10;
        assert!(SudokuBoard::from_rows(rows).is_err());
    }
}
