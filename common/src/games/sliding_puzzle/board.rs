use crate::games::{Direction, GridPos, SessionRng};
use super::settings::ShuffleMode;

/// Legal moves made per tile when shuffling by sliding.
const SLIDES_PER_TILE: usize = 20;

/// N×N sliding board. `tiles[i]` is the id of the tile shown at index `i`;
/// tile `t` carries image region `(t / N, t % N)` and the last id is the blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlidingBoard {
    tiles: Vec<usize>,
    size: usize,
    empty_pos: usize,
    moves: u32,
}

impl SlidingBoard {
    pub fn solved(size: usize) -> Self {
        let size = size.max(2);
        let tiles: Vec<usize> = (0..size * size).collect();
        Self {
            empty_pos: tiles.len() - 1,
            tiles,
            size,
            moves: 0,
        }
    }

    pub fn shuffled(size: usize, mode: ShuffleMode, rng: &mut SessionRng) -> Self {
        let mut board = Self::solved(size);
        match mode {
            ShuffleMode::Labels => {
                let last = board.tiles.len() - 1;
                rng.shuffle(&mut board.tiles[..last]);
            }
            ShuffleMode::Slides => {
                let mut previous: Option<Direction> = None;
                for _ in 0..board.tiles.len() * SLIDES_PER_TILE {
                    let candidates: Vec<Direction> = Direction::ALL
                        .into_iter()
                        .filter(|&d| previous.is_none_or(|p| !d.is_opposite(p)))
                        .filter(|&d| board.blank_target(d).is_some())
                        .collect();
                    if let Some(&direction) = rng.choose(&candidates) {
                        board.move_blank(direction);
                        previous = Some(direction);
                    }
                }
                board.moves = 0;
            }
        }
        board
    }

    /// Test and replay hook: builds a board from an explicit tile order.
    pub fn from_tiles(size: usize, tiles: Vec<usize>) -> Result<Self, String> {
        let count = size * size;
        if tiles.len() != count {
            return Err(format!("Expected {} tiles, got {}", count, tiles.len()));
        }
        let mut seen = vec![false; count];
        for &tile in &tiles {
            if tile >= count || seen[tile] {
                return Err(format!("Tiles must be a permutation of 0..{}", count));
            }
            seen[tile] = true;
        }
        let empty_pos = tiles
            .iter()
            .position(|&t| t == count - 1)
            .ok_or_else(|| "Blank tile is missing".to_string())?;
        Ok(Self {
            tiles,
            size,
            empty_pos,
            moves: 0,
        })
    }

    fn position_of(&self, index: usize) -> GridPos {
        GridPos::from_index(index, self.size)
    }

    fn blank_target(&self, direction: Direction) -> Option<usize> {
        self.position_of(self.empty_pos)
            .step(direction)
            .to_index(self.size, self.size)
    }

    /// Moves the blank one cell in `direction`, swapping it with that neighbour.
    pub fn move_blank(&mut self, direction: Direction) -> bool {
        let Some(target) = self.blank_target(direction) else {
            return false;
        };
        self.tiles.swap(self.empty_pos, target);
        self.empty_pos = target;
        self.moves += 1;
        true
    }

    /// Slides the clicked tile into the blank when the two are orthogonal neighbours.
    pub fn click(&mut self, pos: GridPos) -> bool {
        if pos.to_index(self.size, self.size).is_none() {
            return false;
        }
        let blank = self.position_of(self.empty_pos);
        if blank.manhattan(pos) != 1 {
            return false;
        }
        let direction = Direction::ALL
            .into_iter()
            .find(|&d| blank.step(d) == pos);
        match direction {
            Some(direction) => self.move_blank(direction),
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .take(self.tiles.len() - 1)
            .all(|(index, &tile)| index == tile)
    }

    /// A board is reachable from the solved one iff the permutation parity
    /// equals the parity of the blank's distance from its home cell.
    pub fn is_solvable(&self) -> bool {
        let mut visited = vec![false; self.tiles.len()];
        let mut transpositions = 0;
        for start in 0..self.tiles.len() {
            if visited[start] {
                continue;
            }
            let mut cycle_len = 0;
            let mut index = start;
            while !visited[index] {
                visited[index] = true;
                index = self.tiles[index];
                cycle_len += 1;
            }
            transpositions += cycle_len - 1;
        }

        let home = self.position_of(self.tiles.len() - 1);
        let blank_distance = self.position_of(self.empty_pos).manhattan(home) as usize;
        transpositions % 2 == blank_distance % 2
    }

    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<usize> {
        pos.to_index(self.size, self.size).map(|i| self.tiles[i])
    }

    pub fn is_blank(&self, tile: usize) -> bool {
        tile == self.tiles.len() - 1
    }

    /// Image region `(row, col)` carried by a tile.
    pub fn region_of(&self, tile: usize) -> (usize, usize) {
        (tile / self.size, tile % self.size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn empty_pos(&self) -> usize {
        self.empty_pos
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_up_moves_blank_up() {
        let mut board = SlidingBoard::solved(4);
        assert_eq!(board.empty_pos(), 15);
        assert!(board.move_blank(Direction::Up));
        assert_eq!(board.empty_pos(), 11);
        assert_eq!(board.tiles()[15], 11);
        assert_eq!(board.tiles()[11], 15);
        assert_eq!(board.moves(), 1);
    }

    #[test]
    fn test_move_off_edge_rejected() {
        let mut board = SlidingBoard::solved(3);
        assert!(!board.move_blank(Direction::Down));
        assert!(!board.move_blank(Direction::Right));
        assert_eq!(board.moves(), 0);
        assert!(board.is_solved());
    }

    #[test]
    fn test_click_adjacent_tile() {
        let mut board = SlidingBoard::solved(3);
        assert!(board.click(GridPos::new(1, 2)));
        assert_eq!(board.empty_pos(), 7);
        assert!(!board.is_solved());
        assert!(board.click(GridPos::new(2, 2)));
        assert!(board.is_solved());
        assert_eq!(board.moves(), 2);
    }

    #[test]
    fn test_click_non_adjacent_ignored() {
        let mut board = SlidingBoard::solved(3);
        assert!(!board.click(GridPos::new(1, 1)));
        assert!(!board.click(GridPos::new(0, 2)));
        assert!(!board.click(GridPos::new(3, 2)));
        assert!(!board.click(GridPos::new(2, 2)));
        assert_eq!(board.moves(), 0);
    }

    #[test]
    fn test_click_does_not_wrap_rows() {
        let mut board = SlidingBoard::from_tiles(3, vec![0, 1, 2, 8, 4, 5, 6, 7, 3]).unwrap();
        // Index 2 is one slot before the blank in row-major order but sits on another row.
        assert!(!board.click(GridPos::new(2, 0)));
    }

    #[test]
    fn test_label_shuffle_keeps_blank_last() {
        let mut rng = SessionRng::new(5);
        let board = SlidingBoard::shuffled(4, ShuffleMode::Labels, &mut rng);
        assert_eq!(board.empty_pos(), 15);
        assert_eq!(board.tiles()[15], 15);
        assert_eq!(board.moves(), 0);
    }

    #[test]
    fn test_slide_shuffle_always_solvable() {
        let mut rng = SessionRng::new(17);
        for size in [3, 4] {
            for _ in 0..10 {
                let board = SlidingBoard::shuffled(size, ShuffleMode::Slides, &mut rng);
                assert!(board.is_solvable());
                assert_eq!(board.moves(), 0);
            }
        }
    }

    #[test]
    fn test_single_swap_is_unsolvable() {
        let board = SlidingBoard::from_tiles(3, vec![1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(!board.is_solvable());
        assert!(SlidingBoard::solved(4).is_solvable());
    }

    #[test]
    fn test_from_tiles_rejects_duplicates() {
        assert!(SlidingBoard::from_tiles(3, vec![0, 0, 2, 3, 4, 5, 6, 7, 8]).is_err());
        assert!(SlidingBoard::from_tiles(3, vec![0, 1, 2]).is_err());
    }

    #[test]
    fn test_region_of_tile() {
        let board = SlidingBoard::solved(4);
        assert_eq!(board.region_of(6), (1, 2));
        assert!(board.is_blank(15));
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn test_moves_keep_a_permutation(
            size in 3usize..=4,
            seed in any::<u64>(),
            directions in prop::collection::vec(direction_strategy(), 0..200),
        ) {
            let mut rng = SessionRng::new(seed);
            let mut board = SlidingBoard::shuffled(size, ShuffleMode::Labels, &mut rng);
            let solvable = board.is_solvable();
            for direction in directions {
                board.move_blank(direction);
            }
            let mut sorted = board.tiles().to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..size * size).collect::<Vec<_>>());
            prop_assert_eq!(board.tiles().iter().filter(|&&t| board.is_blank(t)).count(), 1);
            prop_assert!(board.is_blank(board.tiles()[board.empty_pos()]));
            prop_assert_eq!(board.is_solvable(), solvable);
        }

        #[test]
        fn test_click_accepted_iff_adjacent(
            size in 3usize..=4,
            seed in any::<u64>(),
            x in 0i32..4,
            y in 0i32..4,
        ) {
            let mut rng = SessionRng::new(seed);
            let mut board = SlidingBoard::shuffled(size, ShuffleMode::Slides, &mut rng);
            let blank = GridPos::from_index(board.empty_pos(), size);
            let target = GridPos::new(x, y);
            let adjacent = target.in_bounds(size, size) && blank.manhattan(target) == 1;
            let moves = board.moves();
            prop_assert_eq!(board.click(target), adjacent);
            prop_assert_eq!(board.moves(), if adjacent { moves + 1 } else { moves });
        }
    }
}
