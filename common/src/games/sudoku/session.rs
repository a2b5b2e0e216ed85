use std::collections::BTreeSet;

use glam::Vec2;

use crate::games::{SessionFlow, SessionRng};
use crate::log;
use super::board::Cell;
use super::game::{SudokuGame, SudokuLayout};
use super::settings::SudokuSettings;

pub const MSG_NEW_GAME: &str = "New game started!";
pub const MSG_SOLVED: &str = "Congratulations! Puzzle solved correctly!";
pub const MSG_INCOMPLETE: &str = "Puzzle is not complete yet!";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SudokuCommand {
    Select(Vec2),
    Place(u8),
    Check,
    Reveal,
    NewGame,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Incomplete,
    Correct,
    Incorrect(BTreeSet<Cell>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub remaining_ticks: u32,
}

pub struct SudokuSession {
    game: SudokuGame,
    settings: SudokuSettings,
    layout: SudokuLayout,
    rng: SessionRng,
    elapsed_ticks: u64,
    solved: bool,
    message: Option<StatusMessage>,
    highlighted: BTreeSet<Cell>,
}

impl SudokuSession {
    pub fn new(settings: SudokuSettings, layout: SudokuLayout, mut rng: SessionRng) -> Self {
        let game = SudokuGame::new(settings.difficulty, layout, &mut rng);
        Self {
            game,
            settings,
            layout,
            rng,
            elapsed_ticks: 0,
            solved: false,
            message: None,
            highlighted: BTreeSet::new(),
        }
    }

    pub fn apply(&mut self, command: SudokuCommand) -> SessionFlow {
        match command {
            SudokuCommand::Select(point) => {
                self.game.select(point);
            }
            SudokuCommand::Place(digit) => {
                self.game.place(digit);
            }
            SudokuCommand::Check => {
                self.check();
            }
            SudokuCommand::Reveal => {
                self.reveal();
            }
            SudokuCommand::NewGame => self.new_game(self.settings.difficulty),
            SudokuCommand::Quit => return SessionFlow::Quit,
        }
        SessionFlow::Continue
    }

    pub fn new_game(&mut self, difficulty: f32) {
        self.settings.difficulty = difficulty.clamp(0.0, 1.0);
        self.game = SudokuGame::new(self.settings.difficulty, self.layout, &mut self.rng);
        self.elapsed_ticks = 0;
        self.solved = false;
        self.highlighted.clear();
        self.show_message(MSG_NEW_GAME.to_string());
        log!(
            "New sudoku with difficulty {:.2} ({} clues)",
            self.settings.difficulty,
            self.game.original().filled_count()
        );
    }

    /// Only a full board is judged.
    pub fn check(&mut self) -> CheckOutcome {
        if !self.game.is_complete() {
            self.show_message(MSG_INCOMPLETE.to_string());
            return CheckOutcome::Incomplete;
        }

        let incorrect = self.game.check_solution();
        if incorrect.is_empty() {
            self.highlighted.clear();
            self.show_message(MSG_SOLVED.to_string());
            if !self.solved {
                log!("Sudoku solved in {} ticks", self.elapsed_ticks);
            }
            self.solved = true;
            return CheckOutcome::Correct;
        }

        self.show_message(incorrect_message(incorrect.len()));
        self.highlighted = incorrect.clone();
        CheckOutcome::Incorrect(incorrect)
    }

    /// Highlights conflicts whether or not the board is full.
    pub fn reveal(&mut self) -> BTreeSet<Cell> {
        let incorrect = self.game.check_solution();
        self.show_message(incorrect_message(incorrect.len()));
        self.highlighted = incorrect.clone();
        incorrect
    }

    fn show_message(&mut self, text: String) {
        self.message = Some(StatusMessage {
            text,
            remaining_ticks: self.settings.message_ticks,
        });
    }

    pub fn tick(&mut self) {
        if !self.solved {
            self.elapsed_ticks += 1;
        }
        if let Some(message) = self.message.as_mut() {
            message.remaining_ticks = message.remaining_ticks.saturating_sub(1);
            if message.remaining_ticks == 0 {
                self.message = None;
            }
        }
    }

    pub fn game(&self) -> &SudokuGame {
        &self.game
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn highlighted(&self) -> &BTreeSet<Cell> {
        &self.highlighted
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    #[cfg(test)]
    fn set_game(&mut self, game: SudokuGame) {
        self.game = game;
    }
}

fn incorrect_message(count: usize) -> String {
    format!("Found {} incorrect cells!", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::sudoku::board::test_boards::solved;

    fn create_session() -> SudokuSession {
        SudokuSession::new(
            SudokuSettings::default(),
            SudokuLayout::default(),
            SessionRng::new(21),
        )
    }

    fn session_one_cell_left() -> SudokuSession {
        let mut session = create_session();
        let solution = solved();
        let mut puzzle = solution;
        puzzle.set(8, 8, 0);
        session.set_game(SudokuGame::from_boards(puzzle, solution, SudokuLayout::default()));
        session
    }

    #[test]
    fn test_check_incomplete_board() {
        let mut session = session_one_cell_left();
        assert_eq!(session.check(), CheckOutcome::Incomplete);
        assert_eq!(session.message().unwrap().text, MSG_INCOMPLETE);
        assert!(session.highlighted().is_empty());
    }

    #[test]
    fn test_reveal_ignores_completeness() {
        let mut session = session_one_cell_left();
        session.game.select_cell((8, 8));
        session.game.place(1);
        session.game.place(0);
        assert!(session.reveal().is_empty());
        assert_eq!(session.message().unwrap().text, "Found 0 incorrect cells!");
    }

    #[test]
    fn test_check_correct_board_stops_timer() {
        let mut session = session_one_cell_left();
        session.tick();
        session.apply(SudokuCommand::Select(
            SudokuLayout::default().cell_origin((8, 8)) + Vec2::splat(1.0),
        ));
        session.apply(SudokuCommand::Place(9));
        assert_eq!(session.check(), CheckOutcome::Correct);
        assert_eq!(session.message().unwrap().text, MSG_SOLVED);
        session.tick();
        assert_eq!(session.elapsed_ticks(), 1);
        assert!(session.is_solved());
    }

    #[test]
    fn test_check_wrong_digit() {
        let mut session = session_one_cell_left();
        session.game.select_cell((8, 8));
        session.apply(SudokuCommand::Place(1));
        match session.check() {
            CheckOutcome::Incorrect(cells) => assert!(cells.contains(&(8, 8))),
            other => panic!("expected conflicts, got {:?}", other),
        }
        assert!(session.highlighted().contains(&(8, 8)));
    }

    #[test]
    fn test_message_expires() {
        let mut session = create_session();
        session.apply(SudokuCommand::Check);
        for _ in 0..59 {
            session.tick();
        }
        assert!(session.message().is_some());
        session.tick();
        assert!(session.message().is_none());
    }

    #[test]
    fn test_new_game_resets() {
        let mut session = create_session();
        session.tick();
        session.reveal();
        session.new_game(0.0);
        assert!(session.game().is_complete());
        assert_eq!(session.elapsed_ticks(), 0);
        assert!(session.highlighted().is_empty());
        assert_eq!(session.message().unwrap().text, MSG_NEW_GAME);
    }

    #[test]
    fn test_quit() {
        let mut session = create_session();
        assert_eq!(session.apply(SudokuCommand::Quit), SessionFlow::Quit);
    }
}
