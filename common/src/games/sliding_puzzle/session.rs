use crate::games::{Direction, GridPos, SessionFlow, SessionRng, SoundSettings};
use crate::log;
use super::board::SlidingBoard;
use super::settings::{SlidingSettings, SUPPORTED_GRID_SIZES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlidingCommand {
    Move(Direction),
    Click(GridPos),
    Reset,
    SwitchGridSize,
    TogglePreview,
    ToggleSettings,
    ToggleSlideSound,
    ToggleMusic,
    AdjustVolume(i32),
    Quit,
}

/// Hooks for sound playback in the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlidingEvent {
    Slid,
    Solved { moves: u32, elapsed_ticks: u64 },
}

pub struct SlidingSession {
    board: SlidingBoard,
    settings: SlidingSettings,
    sound: SoundSettings,
    rng: SessionRng,
    elapsed_ticks: u64,
    solved: bool,
    show_preview: bool,
    show_settings: bool,
    events: Vec<SlidingEvent>,
}

impl SlidingSession {
    pub fn new(settings: SlidingSettings, mut rng: SessionRng) -> Self {
        let board = SlidingBoard::shuffled(settings.grid_size, settings.shuffle_mode, &mut rng);
        let sound = SoundSettings {
            effects: settings.slide_sound,
            ..SoundSettings::default()
        };
        let mut session = Self {
            solved: board.is_solved(),
            board,
            settings,
            sound,
            rng,
            elapsed_ticks: 0,
            show_preview: false,
            show_settings: false,
            events: Vec::new(),
        };
        session.log_new_board();
        session
    }

    pub fn apply(&mut self, command: SlidingCommand) -> SessionFlow {
        match command {
            SlidingCommand::Move(direction) => {
                self.move_blank(direction);
            }
            SlidingCommand::Click(pos) => {
                self.click(pos);
            }
            SlidingCommand::Reset => self.reset(self.settings.grid_size),
            SlidingCommand::SwitchGridSize => {
                let next = SUPPORTED_GRID_SIZES
                    .into_iter()
                    .find(|&size| size != self.settings.grid_size)
                    .unwrap_or(self.settings.grid_size);
                self.reset(next);
            }
            SlidingCommand::TogglePreview => self.show_preview = !self.show_preview,
            SlidingCommand::ToggleSettings => self.show_settings = !self.show_settings,
            SlidingCommand::ToggleSlideSound => {
                self.settings.slide_sound = self.sound.toggle_effects();
            }
            SlidingCommand::ToggleMusic => {
                self.sound.toggle_music();
            }
            SlidingCommand::AdjustVolume(steps) => {
                self.sound.adjust_volume(steps);
            }
            SlidingCommand::Quit => return SessionFlow::Quit,
        }
        SessionFlow::Continue
    }

    pub fn move_blank(&mut self, direction: Direction) -> bool {
        let moved = self.board.move_blank(direction);
        if moved {
            self.after_slide();
        }
        moved
    }

    pub fn click(&mut self, pos: GridPos) -> bool {
        let moved = self.board.click(pos);
        if moved {
            self.after_slide();
        }
        moved
    }

    fn after_slide(&mut self) {
        self.events.push(SlidingEvent::Slid);
        let solved = self.board.is_solved();
        if solved && !self.solved {
            log!(
                "Sliding puzzle solved in {} moves, {} ticks",
                self.board.moves(),
                self.elapsed_ticks
            );
            self.events.push(SlidingEvent::Solved {
                moves: self.board.moves(),
                elapsed_ticks: self.elapsed_ticks,
            });
        }
        self.solved = solved;
    }

    /// Discards the board and deals a new one of `grid_size`.
    pub fn reset(&mut self, grid_size: usize) {
        if SUPPORTED_GRID_SIZES.contains(&grid_size) {
            self.settings.grid_size = grid_size;
        }
        self.board = SlidingBoard::shuffled(
            self.settings.grid_size,
            self.settings.shuffle_mode,
            &mut self.rng,
        );
        self.solved = self.board.is_solved();
        self.elapsed_ticks = 0;
        self.log_new_board();
    }

    fn log_new_board(&self) {
        log!(
            "New {}x{} sliding puzzle ({:?}, solvable: {})",
            self.board.size(),
            self.board.size(),
            self.settings.shuffle_mode,
            self.board.is_solvable()
        );
    }

    /// The timer only runs while the board is unsolved.
    pub fn tick(&mut self) {
        if !self.solved {
            self.elapsed_ticks += 1;
        }
    }

    pub fn drain_events(&mut self) -> Vec<SlidingEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn board(&self) -> &SlidingBoard {
        &self.board
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    pub fn show_settings(&self) -> bool {
        self.show_settings
    }

    pub fn sound(&self) -> &SoundSettings {
        &self.sound
    }

    pub fn settings(&self) -> &SlidingSettings {
        &self.settings
    }

    #[cfg(test)]
    fn set_board(&mut self, board: SlidingBoard) {
        self.solved = board.is_solved();
        self.board = board;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_session(grid_size: usize) -> SlidingSession {
        let settings = SlidingSettings {
            grid_size,
            ..SlidingSettings::default()
        };
        SlidingSession::new(settings, SessionRng::new(99))
    }

    fn one_move_from_solved(size: usize) -> SlidingBoard {
        let mut board = SlidingBoard::solved(size);
        board.move_blank(Direction::Left);
        SlidingBoard::from_tiles(size, board.tiles().to_vec()).unwrap()
    }

    #[test]
    fn test_solving_emits_event_once() {
        let mut session = create_session(3);
        session.set_board(one_move_from_solved(3));
        for _ in 0..5 {
            session.tick();
        }

        session.apply(SlidingCommand::Move(Direction::Right));

        assert!(session.is_solved());
        assert_eq!(
            session.drain_events(),
            vec![
                SlidingEvent::Slid,
                SlidingEvent::Solved {
                    moves: 1,
                    elapsed_ticks: 5
                }
            ]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_timer_stops_when_solved() {
        let mut session = create_session(3);
        session.set_board(one_move_from_solved(3));
        session.tick();
        session.click(GridPos::new(2, 2));
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_ticks(), 1);
    }

    #[test]
    fn test_illegal_move_emits_nothing() {
        let mut session = create_session(4);
        session.set_board(SlidingBoard::solved(4));
        assert!(!session.move_blank(Direction::Down));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_switch_grid_size_regenerates() {
        let mut session = create_session(3);
        session.tick();
        session.apply(SlidingCommand::SwitchGridSize);
        assert_eq!(session.board().size(), 4);
        assert_eq!(session.board().empty_pos(), 15);
        assert_eq!(session.board().moves(), 0);
        assert_eq!(session.elapsed_ticks(), 0);
        session.apply(SlidingCommand::SwitchGridSize);
        assert_eq!(session.board().size(), 3);
    }

    #[test]
    fn test_reset_ignores_unsupported_size() {
        let mut session = create_session(4);
        session.reset(7);
        assert_eq!(session.board().size(), 4);
    }

    #[test]
    fn test_toggles_and_volume() {
        let mut session = create_session(3);
        session.apply(SlidingCommand::TogglePreview);
        session.apply(SlidingCommand::ToggleSettings);
        session.apply(SlidingCommand::ToggleSlideSound);
        session.apply(SlidingCommand::ToggleMusic);
        session.apply(SlidingCommand::AdjustVolume(3));
        assert!(session.show_preview());
        assert!(session.show_settings());
        assert!(!session.sound().effects);
        assert!(!session.settings().slide_sound);
        assert!(session.sound().music);
        assert_eq!(session.sound().volume_percent(), 80);
    }

    #[test]
    fn test_quit() {
        let mut session = create_session(3);
        assert_eq!(session.apply(SlidingCommand::Quit), SessionFlow::Quit);
        assert_eq!(session.apply(SlidingCommand::Reset), SessionFlow::Continue);
    }
}
