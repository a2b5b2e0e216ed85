use crate::games::SessionRng;
use super::board::{BASE, CELL_COUNT, SIDE, SudokuBoard};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSudoku {
    pub puzzle: SudokuBoard,
    pub solution: SudokuBoard,
}

/// Index of the digit at `(row, col)` in the unshuffled base pattern.
fn pattern(row: usize, col: usize) -> usize {
    (BASE * (row % BASE) + row / BASE + col) % SIDE
}

/// Band-then-line order: shuffles the bands, then the lines inside each band.
fn shuffled_lines(rng: &mut SessionRng) -> [usize; SIDE] {
    let mut bands: [usize; BASE] = std::array::from_fn(|i| i);
    rng.shuffle(&mut bands);

    let mut lines = [0; SIDE];
    for (band_slot, band) in bands.into_iter().enumerate() {
        let mut inner: [usize; BASE] = std::array::from_fn(|i| i);
        rng.shuffle(&mut inner);
        for (line_slot, line) in inner.into_iter().enumerate() {
            lines[band_slot * BASE + line_slot] = band * BASE + line;
        }
    }
    lines
}

pub fn generate_solution(rng: &mut SessionRng) -> SudokuBoard {
    let rows = shuffled_lines(rng);
    let cols = shuffled_lines(rng);
    let mut digits: [u8; SIDE] = std::array::from_fn(|i| i as u8 + 1);
    rng.shuffle(&mut digits);

    let mut board = SudokuBoard::empty();
    for (r, &row) in rows.iter().enumerate() {
        for (c, &col) in cols.iter().enumerate() {
            board.set(r, c, digits[pattern(row, col)]);
        }
    }
    board
}

/// Number of cells blanked for a difficulty in `[0, 1]`.
pub fn cells_to_remove(difficulty: f32) -> usize {
    (CELL_COUNT as f32 * difficulty.clamp(0.0, 1.0)).round() as usize
}

/// A shuffled solved grid with `round(81 * difficulty)` cells blanked.
/// The puzzle is not guaranteed to have a unique solution.
pub fn generate_sudoku(difficulty: f32, rng: &mut SessionRng) -> GeneratedSudoku {
    let solution = generate_solution(rng);
    let mut puzzle = solution;
    for index in rng.sample_indices(CELL_COUNT, cells_to_remove(difficulty)) {
        puzzle.set(index / SIDE, index % SIDE, 0);
    }
    GeneratedSudoku { puzzle, solution }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_zero_is_full_valid_board() {
        let mut rng = SessionRng::new(1);
        let generated = generate_sudoku(0.0, &mut rng);
        assert!(generated.puzzle.is_complete());
        assert!(generated.puzzle.check_solution().is_empty());
        assert_eq!(generated.puzzle, generated.solution);
        for row in generated.puzzle.rows() {
            let mut digits = row.to_vec();
            digits.sort_unstable();
            assert_eq!(digits, (1..=9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_difficulty_one_is_empty_board() {
        let mut rng = SessionRng::new(2);
        let generated = generate_sudoku(1.0, &mut rng);
        assert_eq!(generated.puzzle.filled_count(), 0);
        assert!(generated.solution.is_complete());
    }

    #[test]
    fn test_removed_count_matches_difficulty() {
        let mut rng = SessionRng::new(3);
        let generated = generate_sudoku(0.5, &mut rng);
        assert_eq!(cells_to_remove(0.5), 41);
        assert_eq!(generated.puzzle.filled_count(), CELL_COUNT - 41);
    }

    #[test]
    fn test_difficulty_is_clamped() {
        assert_eq!(cells_to_remove(-1.0), 0);
        assert_eq!(cells_to_remove(3.0), 81);
    }

    #[test]
    fn test_clues_match_solution() {
        let mut rng = SessionRng::new(4);
        let generated = generate_sudoku(0.6, &mut rng);
        for row in 0..SIDE {
            for col in 0..SIDE {
                let clue = generated.puzzle.get(row, col);
                if clue != 0 {
                    assert_eq!(clue, generated.solution.get(row, col));
                }
            }
        }
    }

    #[test]
    fn test_many_seeds_produce_valid_solutions() {
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let solution = generate_solution(&mut rng);
            assert!(solution.is_complete());
            assert!(solution.check_solution().is_empty(), "seed {}", seed);
        }
    }
}
