use glam::Vec2;

use crate::games::{SessionFlow, SessionRng, SoundSettings};
use crate::log;
use super::engine::{DropOutcome, JigsawBoard, PieceId};
use super::layout::JigsawLayout;
use super::settings::JigsawSettings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JigsawCommand {
    PointerDown(Vec2),
    PointerUp(Vec2),
    Scroll(f32),
    ScrollLeft,
    ScrollRight,
    Reset,
    TogglePreview,
    ToggleSettings,
    TogglePieceSound,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JigsawEvent {
    PickedUp(PieceId),
    Placed(PieceId),
    Returned(PieceId),
    Completed { elapsed_ticks: u64 },
}

pub struct JigsawSession {
    board: JigsawBoard,
    layout: JigsawLayout,
    settings: JigsawSettings,
    sound: SoundSettings,
    rng: SessionRng,
    elapsed_ticks: u64,
    completed: bool,
    show_preview: bool,
    show_settings: bool,
    events: Vec<JigsawEvent>,
}

impl JigsawSession {
    pub fn new(settings: JigsawSettings, layout: JigsawLayout, mut rng: SessionRng) -> Self {
        let board = Self::deal(&settings, layout, &mut rng);
        let sound = SoundSettings {
            effects: settings.piece_sound,
            ..SoundSettings::default()
        };
        Self {
            board,
            layout,
            settings,
            sound,
            rng,
            elapsed_ticks: 0,
            completed: false,
            show_preview: false,
            show_settings: false,
            events: Vec::new(),
        }
    }

    fn deal(settings: &JigsawSettings, layout: JigsawLayout, rng: &mut SessionRng) -> JigsawBoard {
        if settings.shuffle_carousel {
            JigsawBoard::shuffled(layout, rng)
        } else {
            JigsawBoard::new(layout)
        }
    }

    pub fn apply(&mut self, command: JigsawCommand) -> SessionFlow {
        match command {
            JigsawCommand::PointerDown(point) => {
                self.pick_up(point);
            }
            JigsawCommand::PointerUp(point) => {
                self.drop(point);
            }
            JigsawCommand::Scroll(delta) => self.board.scroll(delta),
            JigsawCommand::ScrollLeft => self.board.scroll_left(),
            JigsawCommand::ScrollRight => self.board.scroll_right(),
            JigsawCommand::Reset => self.reset(),
            JigsawCommand::TogglePreview => self.show_preview = !self.show_preview,
            JigsawCommand::ToggleSettings => self.show_settings = !self.show_settings,
            JigsawCommand::TogglePieceSound => {
                self.settings.piece_sound = self.sound.toggle_effects();
            }
            JigsawCommand::Quit => return SessionFlow::Quit,
        }
        SessionFlow::Continue
    }

    pub fn pick_up(&mut self, point: Vec2) -> Option<PieceId> {
        let picked = self.board.pick_up(point);
        if let Some(id) = picked {
            self.events.push(JigsawEvent::PickedUp(id));
        }
        picked
    }

    pub fn drop(&mut self, point: Vec2) -> DropOutcome {
        let outcome = self.board.drop(point);
        match outcome {
            DropOutcome::Placed(id) => {
                log!(
                    "Jigsaw piece {} placed ({}/{})",
                    id,
                    self.board.placed().len(),
                    self.layout.piece_count()
                );
                self.events.push(JigsawEvent::Placed(id));
                if self.board.is_complete() && !self.completed {
                    self.completed = true;
                    log!("Jigsaw completed in {} ticks", self.elapsed_ticks);
                    self.events.push(JigsawEvent::Completed {
                        elapsed_ticks: self.elapsed_ticks,
                    });
                }
            }
            DropOutcome::Returned(id) => self.events.push(JigsawEvent::Returned(id)),
            DropOutcome::NothingHeld => {}
        }
        outcome
    }

    pub fn reset(&mut self) {
        self.board = Self::deal(&self.settings, self.layout, &mut self.rng);
        self.elapsed_ticks = 0;
        self.completed = false;
        log!("Jigsaw reset");
    }

    /// The timer runs until the last piece is placed.
    pub fn tick(&mut self) {
        if !self.completed {
            self.elapsed_ticks += 1;
        }
    }

    pub fn drain_events(&mut self) -> Vec<JigsawEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn board(&self) -> &JigsawBoard {
        &self.board
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
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

    pub fn settings(&self) -> &JigsawSettings {
        &self.settings
    }
}
