use common::games::sliding_puzzle::{SUPPORTED_GRID_SIZES, SlidingCommand, SlidingEvent, SlidingSession, SlidingSettings};
use common::games::{Direction, GridPos, SessionFlow, SessionRng};
use eframe::egui::{self, Align2, Color32, Pos2, Rect, Stroke, StrokeKind};
use glam::Vec2;

use crate::event_log::EventLog;
use crate::images::ImageLibrary;
use crate::ui::game::sidebar::{SIDEBAR_X, SidebarAction, SidebarLayout, image_picker, upload_image};
use crate::ui::widgets::{
    ACCENT_1, ACCENT_2, ACCENT_3, ACCENT_4, Area, Canvas, FrameInput, SETTINGS_BG, TEXT_COLOR,
    TILE_BG, draw_button, draw_overlay, draw_text, whole_seconds,
};

const BOARD_SIZE: f32 = 600.0;

const SETTINGS_PANEL: Area = Area::new(200.0, 150.0, 400.0, 400.0);
const SLIDE_SOUND_BUTTON: Area = Area::new(250.0, 220.0, 300.0, 50.0);
const MUSIC_BUTTON: Area = Area::new(250.0, 290.0, 300.0, 50.0);
const VOLUME_BAR: Area = Area::new(250.0, 350.0, 300.0, 30.0);
const VOLUME_DOWN_BUTTON: Area = Area::new(220.0, 350.0, 25.0, 30.0);
const VOLUME_UP_BUTTON: Area = Area::new(555.0, 350.0, 25.0, 30.0);
const GRID_SIZE_BUTTON: Area = Area::new(250.0, 390.0, 300.0, 50.0);
const QUIT_BUTTON: Area = Area::new(250.0, 450.0, 300.0, 50.0);

pub fn sliding_command_for_key(key: egui::Key) -> Option<SlidingCommand> {
    match key {
        egui::Key::ArrowUp => Some(SlidingCommand::Move(Direction::Up)),
        egui::Key::ArrowDown => Some(SlidingCommand::Move(Direction::Down)),
        egui::Key::ArrowLeft => Some(SlidingCommand::Move(Direction::Left)),
        egui::Key::ArrowRight => Some(SlidingCommand::Move(Direction::Right)),
        egui::Key::P => Some(SlidingCommand::TogglePreview),
        egui::Key::R => Some(SlidingCommand::Reset),
        egui::Key::Escape => Some(SlidingCommand::Quit),
        _ => None,
    }
}

/// Board cell under `point`, if the point is on the board.
pub fn board_cell_at(point: Vec2, grid_size: usize) -> Option<GridPos> {
    if point.x < 0.0 || point.y < 0.0 || point.x >= BOARD_SIZE || point.y >= BOARD_SIZE {
        return None;
    }
    let tile = BOARD_SIZE / grid_size as f32;
    Some(GridPos::new((point.x / tile) as i32, (point.y / tile) as i32))
}

/// Settings panel buttons. A click anywhere else closes the panel.
pub fn settings_command_at(point: Vec2) -> SlidingCommand {
    if SLIDE_SOUND_BUTTON.contains(point) {
        SlidingCommand::ToggleSlideSound
    } else if MUSIC_BUTTON.contains(point) {
        SlidingCommand::ToggleMusic
    } else if VOLUME_DOWN_BUTTON.contains(point) {
        SlidingCommand::AdjustVolume(-1)
    } else if VOLUME_UP_BUTTON.contains(point) {
        SlidingCommand::AdjustVolume(1)
    } else if GRID_SIZE_BUTTON.contains(point) {
        SlidingCommand::SwitchGridSize
    } else if QUIT_BUTTON.contains(point) {
        SlidingCommand::Quit
    } else {
        SlidingCommand::ToggleSettings
    }
}

pub struct SlidingGameUi {
    session: SlidingSession,
    image_index: usize,
    show_image_picker: bool,
}

impl SlidingGameUi {
    pub fn new(settings: SlidingSettings, rng: SessionRng) -> Self {
        Self {
            session: SlidingSession::new(settings, rng),
            image_index: 0,
            show_image_picker: false,
        }
    }

    pub fn tick(&mut self) {
        self.session.tick();
    }

    pub fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        canvas: &Canvas,
        images: &mut ImageLibrary,
        event_log: &mut EventLog,
    ) -> SessionFlow {
        let input = FrameInput::collect(ctx, canvas);
        if self.handle_input(&input, images, event_log) == SessionFlow::Quit {
            return SessionFlow::Quit;
        }

        if let Some(index) = image_picker(ctx, images, &mut self.show_image_picker) {
            self.select_image(index, images, event_log);
        }

        for event in self.session.drain_events() {
            match event {
                SlidingEvent::Slid => {}
                SlidingEvent::Solved { moves, elapsed_ticks } => event_log.push(format!(
                    "Sliding puzzle solved in {} moves, {}s",
                    moves,
                    whole_seconds(elapsed_ticks)
                )),
            }
        }

        let texture = images.texture_id(ctx, self.image_index);
        self.render(ui.painter(), canvas, images, texture);
        ctx.request_repaint();
        SessionFlow::Continue
    }

    fn handle_input(
        &mut self,
        input: &FrameInput,
        images: &mut ImageLibrary,
        event_log: &mut EventLog,
    ) -> SessionFlow {
        for command in input.keys.iter().filter_map(|&key| sliding_command_for_key(key)) {
            if self.apply(command, event_log) == SessionFlow::Quit {
                return SessionFlow::Quit;
            }
        }

        let Some(point) = input.pressed_at else {
            return SessionFlow::Continue;
        };

        if self.session.show_settings() {
            return self.apply(settings_command_at(point), event_log);
        }

        if point.x >= SIDEBAR_X {
            let layout = SidebarLayout::new(images.count());
            match layout.action_at(point) {
                Some(SidebarAction::OpenSettings) => {
                    self.session.apply(SlidingCommand::ToggleSettings);
                }
                Some(SidebarAction::SelectImage(index)) => self.select_image(index, images, event_log),
                Some(SidebarAction::ShowAllImages) => self.show_image_picker = true,
                Some(SidebarAction::Upload) => {
                    if let Some(index) = upload_image(images, event_log) {
                        self.select_image(index, images, event_log);
                    }
                }
                Some(SidebarAction::TogglePreview) => {
                    self.session.apply(SlidingCommand::TogglePreview);
                }
                Some(SidebarAction::Reset) => {
                    self.apply(SlidingCommand::Reset, event_log);
                }
                None => {}
            }
            return SessionFlow::Continue;
        }

        match board_cell_at(point, self.session.board().size()) {
            Some(cell) => self.apply(SlidingCommand::Click(cell), event_log),
            None => SessionFlow::Continue,
        }
    }

    fn apply(&mut self, command: SlidingCommand, event_log: &mut EventLog) -> SessionFlow {
        let flow = self.session.apply(command);
        match command {
            SlidingCommand::Reset => event_log.push("Sliding puzzle reset"),
            SlidingCommand::SwitchGridSize => {
                let size = self.session.board().size();
                event_log.push(format!("Switched to {}x{} grid", size, size));
            }
            _ => {}
        }
        flow
    }

    fn select_image(&mut self, index: usize, images: &ImageLibrary, event_log: &mut EventLog) {
        if index == self.image_index || images.get(index).is_none() {
            return;
        }
        self.image_index = index;
        self.session.reset(self.session.board().size());
        if let Some(image) = images.get(index) {
            event_log.push(format!("Sliding puzzle image: {}", image.name));
        }
    }

    fn render(
        &self,
        painter: &egui::Painter,
        canvas: &Canvas,
        images: &ImageLibrary,
        texture: Option<egui::TextureId>,
    ) {
        let board_area = Area::new(0.0, 0.0, BOARD_SIZE, BOARD_SIZE);
        if self.session.show_preview() {
            if let Some(texture) = texture {
                painter.image(texture, canvas.rect(board_area), full_uv(), Color32::WHITE);
            }
            painter.rect_filled(canvas.rect(board_area), 0.0, Color32::from_white_alpha(128));
            draw_text(
                painter,
                canvas,
                board_area.center(),
                Align2::CENTER_CENTER,
                "Preview Mode",
                32.0,
                TEXT_COLOR,
            );
        } else {
            self.render_tiles(painter, canvas, texture);
        }

        let stats = [
            format!("Time: {}s", whole_seconds(self.session.elapsed_ticks())),
            format!("Moves: {}", self.session.board().moves()),
        ];
        SidebarLayout::new(images.count()).draw(painter, canvas, images, self.image_index, &stats);

        if self.session.show_settings() {
            self.render_settings(painter, canvas);
        }

        if self.session.is_solved() {
            draw_overlay(
                painter,
                canvas,
                board_area,
                Color32::from_white_alpha(150),
                "You Win!",
                ACCENT_1,
                &format!(
                    "Time: {}s  Moves: {}",
                    whole_seconds(self.session.elapsed_ticks()),
                    self.session.board().moves()
                ),
            );
        }
    }

    fn render_tiles(&self, painter: &egui::Painter, canvas: &Canvas, texture: Option<egui::TextureId>) {
        let board = self.session.board();
        let size = board.size();
        let tile_size = BOARD_SIZE / size as f32;

        for (index, &tile) in board.tiles().iter().enumerate() {
            if board.is_blank(tile) {
                continue;
            }
            let pos = GridPos::from_index(index, size);
            let area = Area::new(
                pos.x as f32 * tile_size,
                pos.y as f32 * tile_size,
                tile_size,
                tile_size,
            );
            let rect = canvas.rect(area);
            painter.rect_filled(rect.translate(egui::vec2(3.0, 3.0)), 5.0, Color32::from_black_alpha(60));
            painter.rect_filled(rect, 5.0, TILE_BG);

            let (row, col) = board.region_of(tile);
            match texture {
                Some(texture) => {
                    painter.image(texture, rect.shrink(1.0), region_uv(row, col, size), Color32::WHITE);
                }
                None => draw_text(
                    painter,
                    canvas,
                    area.center(),
                    Align2::CENTER_CENTER,
                    tile + 1,
                    32.0,
                    TEXT_COLOR,
                ),
            }
            painter.rect_stroke(rect, 5.0, Stroke::new(1.0, Color32::from_gray(200)), StrokeKind::Inside);
        }
    }

    fn render_settings(&self, painter: &egui::Painter, canvas: &Canvas) {
        let panel = canvas.rect(SETTINGS_PANEL);
        painter.rect_filled(panel, 15.0, SETTINGS_BG);
        painter.rect_stroke(panel, 15.0, Stroke::new(2.0, Color32::from_rgb(180, 180, 200)), StrokeKind::Inside);
        draw_text(
            painter,
            canvas,
            Vec2::new(400.0, 185.0),
            Align2::CENTER_CENTER,
            "Settings",
            32.0,
            TEXT_COLOR,
        );

        let sound = self.session.sound();
        let (fill, label) = if sound.effects {
            (ACCENT_2, "Slide Sound: ON")
        } else {
            (TILE_BG, "Slide Sound: OFF")
        };
        draw_button(painter, canvas, SLIDE_SOUND_BUTTON, fill, label);

        let (fill, label) = if sound.music {
            (ACCENT_3, "Background Music: ON")
        } else {
            (TILE_BG, "Background Music: OFF")
        };
        draw_button(painter, canvas, MUSIC_BUTTON, fill, label);

        painter.rect_filled(canvas.rect(VOLUME_BAR), 5.0, Color32::from_gray(200));
        let level = Area::new(VOLUME_BAR.x, VOLUME_BAR.y, VOLUME_BAR.w * sound.music_volume, VOLUME_BAR.h);
        painter.rect_filled(canvas.rect(level), 5.0, ACCENT_2);
        draw_text(
            painter,
            canvas,
            VOLUME_BAR.center(),
            Align2::CENTER_CENTER,
            format!("{}%", sound.volume_percent()),
            18.0,
            TEXT_COLOR,
        );
        draw_button(painter, canvas, VOLUME_DOWN_BUTTON, ACCENT_1, "-");
        draw_button(painter, canvas, VOLUME_UP_BUTTON, ACCENT_1, "+");

        let other = SUPPORTED_GRID_SIZES
            .into_iter()
            .find(|&size| size != self.session.board().size())
            .unwrap_or(self.session.board().size());
        draw_button(
            painter,
            canvas,
            GRID_SIZE_BUTTON,
            ACCENT_4,
            &format!("Switch to {}x{}", other, other),
        );
        draw_button(painter, canvas, QUIT_BUTTON, ACCENT_4, "Quit Game");
    }
}

fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
}

/// Texture coordinates of image region `(row, col)` on a `size` x `size` grid.
pub fn region_uv(row: usize, col: usize, size: usize) -> Rect {
    let step = 1.0 / size as f32;
    Rect::from_min_size(
        Pos2::new(col as f32 * step, row as f32 * step),
        egui::vec2(step, step),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            sliding_command_for_key(egui::Key::ArrowUp),
            Some(SlidingCommand::Move(Direction::Up))
        );
        assert_eq!(sliding_command_for_key(egui::Key::P), Some(SlidingCommand::TogglePreview));
        assert_eq!(sliding_command_for_key(egui::Key::R), Some(SlidingCommand::Reset));
        assert_eq!(sliding_command_for_key(egui::Key::A), None);
    }

    #[test]
    fn test_board_cell_at() {
        assert_eq!(board_cell_at(Vec2::new(0.0, 0.0), 3), Some(GridPos::new(0, 0)));
        assert_eq!(board_cell_at(Vec2::new(599.0, 201.0), 3), Some(GridPos::new(2, 1)));
        assert_eq!(board_cell_at(Vec2::new(150.0, 449.0), 4), Some(GridPos::new(1, 2)));
        assert_eq!(board_cell_at(Vec2::new(600.0, 10.0), 3), None);
        assert_eq!(board_cell_at(Vec2::new(10.0, 610.0), 4), None);
    }

    #[test]
    fn test_settings_buttons() {
        assert_eq!(settings_command_at(Vec2::new(300.0, 240.0)), SlidingCommand::ToggleSlideSound);
        assert_eq!(settings_command_at(Vec2::new(300.0, 300.0)), SlidingCommand::ToggleMusic);
        assert_eq!(settings_command_at(Vec2::new(230.0, 360.0)), SlidingCommand::AdjustVolume(-1));
        assert_eq!(settings_command_at(Vec2::new(560.0, 360.0)), SlidingCommand::AdjustVolume(1));
        assert_eq!(settings_command_at(Vec2::new(300.0, 400.0)), SlidingCommand::SwitchGridSize);
        assert_eq!(settings_command_at(Vec2::new(300.0, 470.0)), SlidingCommand::Quit);
        assert_eq!(settings_command_at(Vec2::new(50.0, 50.0)), SlidingCommand::ToggleSettings);
    }

    #[test]
    fn test_region_uv() {
        let uv = region_uv(1, 2, 4);
        assert_eq!(uv.min, Pos2::new(0.5, 0.25));
        assert_eq!(uv.max, Pos2::new(0.75, 0.5));
    }

    #[test]
    fn test_clicking_board_moves_tile_next_to_blank() {
        let mut ui = SlidingGameUi::new(SlidingSettings::default(), SessionRng::new(5));
        let mut event_log = EventLog::new();
        let blank = GridPos::from_index(ui.session.board().empty_pos(), 3);
        let neighbour = Direction::ALL
            .into_iter()
            .map(|direction| blank.step(direction))
            .find(|pos| pos.in_bounds(3, 3))
            .unwrap();

        let center = Vec2::new(neighbour.x as f32 * 200.0 + 100.0, neighbour.y as f32 * 200.0 + 100.0);
        let moves_before = ui.session.board().moves();
        let mut images = ImageLibrary::load("this_directory_does_not_exist");
        let input = FrameInput {
            pressed_at: Some(center),
            ..FrameInput::default()
        };
        assert_eq!(ui.handle_input(&input, &mut images, &mut event_log), SessionFlow::Continue);
        assert_eq!(ui.session.board().moves(), moves_before + 1);
    }

    #[test]
    fn test_escape_quits() {
        let mut ui = SlidingGameUi::new(SlidingSettings::default(), SessionRng::new(5));
        let mut images = ImageLibrary::load("this_directory_does_not_exist");
        let input = FrameInput {
            keys: vec![egui::Key::Escape],
            ..FrameInput::default()
        };
        assert_eq!(ui.handle_input(&input, &mut images, &mut EventLog::new()), SessionFlow::Quit);
    }
}
