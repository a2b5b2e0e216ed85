use common::games::jigsaw::{JigsawCommand, JigsawEvent, JigsawLayout, JigsawSession, JigsawSettings};
use common::games::{SessionFlow, SessionRng};
use eframe::egui::{self, Align2, Color32, Pos2, Rect, Stroke, StrokeKind};
use glam::Vec2;

use crate::event_log::EventLog;
use crate::images::ImageLibrary;
use crate::ui::game::sidebar::{SIDEBAR_X, SidebarAction, SidebarLayout, image_picker, upload_image};
use crate::ui::widgets::{
    ACCENT_1, ACCENT_2, ACCENT_4, Area, Canvas, FrameInput, SETTINGS_BG, TEXT_COLOR, TILE_BG,
    draw_button, draw_overlay, draw_text, format_clock,
};

const ARROW_SIZE: f32 = 30.0;

const SETTINGS_PANEL: Area = Area::new(200.0, 150.0, 400.0, 300.0);
const PIECE_SOUND_BUTTON: Area = Area::new(250.0, 220.0, 300.0, 50.0);
const QUIT_BUTTON: Area = Area::new(250.0, 280.0, 300.0, 50.0);

const BOARD_BACKGROUND: Color32 = Color32::from_gray(240);
const SLOT_FILL: Color32 = Color32::from_gray(220);
const SLOT_BORDER: Color32 = Color32::from_gray(180);
const CAROUSEL_BACKGROUND: Color32 = Color32::from_gray(220);
const CORRECT_FILL: Color32 = Color32::from_rgba_premultiplied(85, 140, 85, 150);
const CORRECT_BORDER: Color32 = Color32::from_rgb(50, 200, 50);
const HELD_BORDER: Color32 = Color32::from_rgb(200, 200, 0);

pub fn jigsaw_command_for_key(key: egui::Key) -> Option<JigsawCommand> {
    match key {
        egui::Key::P => Some(JigsawCommand::TogglePreview),
        egui::Key::R => Some(JigsawCommand::Reset),
        egui::Key::ArrowLeft => Some(JigsawCommand::ScrollLeft),
        egui::Key::ArrowRight => Some(JigsawCommand::ScrollRight),
        egui::Key::Escape => Some(JigsawCommand::Quit),
        _ => None,
    }
}

/// Scroll arrows, vertically centred on the carousel strip.
pub fn arrow_buttons(layout: &JigsawLayout) -> (Area, Area) {
    let y = layout.carousel_top + layout.carousel_height / 2.0 - ARROW_SIZE / 2.0;
    (
        Area::new(10.0, y, ARROW_SIZE, ARROW_SIZE),
        Area::new(layout.viewport_width - ARROW_SIZE - 10.0, y, ARROW_SIZE, ARROW_SIZE),
    )
}

pub fn settings_command_at(point: Vec2) -> JigsawCommand {
    if PIECE_SOUND_BUTTON.contains(point) {
        JigsawCommand::TogglePieceSound
    } else if QUIT_BUTTON.contains(point) {
        JigsawCommand::Quit
    } else {
        JigsawCommand::ToggleSettings
    }
}

/// Texture coordinates of one piece of a `rows` x `cols` cut.
fn piece_uv(row: usize, col: usize, layout: &JigsawLayout) -> Rect {
    let (w, h) = (1.0 / layout.cols as f32, 1.0 / layout.rows as f32);
    Rect::from_min_size(Pos2::new(col as f32 * w, row as f32 * h), egui::vec2(w, h))
}

pub struct JigsawGameUi {
    session: JigsawSession,
    image_index: usize,
    show_image_picker: bool,
}

impl JigsawGameUi {
    pub fn new(settings: JigsawSettings, rng: SessionRng) -> Self {
        Self {
            session: JigsawSession::new(settings, JigsawLayout::default(), rng),
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

        self.report_events(event_log);

        let texture = images.texture_id(ctx, self.image_index);
        self.render(ui.painter(), canvas, images, texture, input.pointer);
        ctx.request_repaint();
        SessionFlow::Continue
    }

    fn report_events(&mut self, event_log: &mut EventLog) {
        for event in self.session.drain_events() {
            match event {
                JigsawEvent::PickedUp(_) => {}
                JigsawEvent::Placed(id) => event_log.push(format!(
                    "Piece {} placed ({}/{})",
                    id,
                    self.session.board().placed().len(),
                    self.session.board().layout().piece_count()
                )),
                JigsawEvent::Returned(id) => event_log.push(format!("Piece {} returned to the carousel", id)),
                JigsawEvent::Completed { elapsed_ticks } => {
                    event_log.push(format!("Jigsaw complete in {}", format_clock(elapsed_ticks)))
                }
            }
        }
    }

    fn handle_input(
        &mut self,
        input: &FrameInput,
        images: &mut ImageLibrary,
        event_log: &mut EventLog,
    ) -> SessionFlow {
        for command in input.keys.iter().filter_map(|&key| jigsaw_command_for_key(key)) {
            if self.apply(command, event_log) == SessionFlow::Quit {
                return SessionFlow::Quit;
            }
        }

        if input.scroll != 0.0 {
            self.session.apply(JigsawCommand::Scroll(-input.scroll));
        }
        if input.secondary_drag != 0.0 {
            self.session.apply(JigsawCommand::Scroll(-input.secondary_drag));
        }

        if let Some(point) = input.pressed_at
            && self.handle_press(point, images, event_log) == SessionFlow::Quit
        {
            return SessionFlow::Quit;
        }

        if let Some(point) = input.released_at {
            self.session.apply(JigsawCommand::PointerUp(point));
        }
        SessionFlow::Continue
    }

    fn handle_press(&mut self, point: Vec2, images: &mut ImageLibrary, event_log: &mut EventLog) -> SessionFlow {
        let layout = *self.session.board().layout();
        let (left, right) = arrow_buttons(&layout);
        if left.contains(point) {
            return self.session.apply(JigsawCommand::ScrollLeft);
        }
        if right.contains(point) {
            return self.session.apply(JigsawCommand::ScrollRight);
        }

        if self.session.show_settings() {
            return self.apply(settings_command_at(point), event_log);
        }

        if point.x >= SIDEBAR_X && layout.is_above_carousel(point) {
            match SidebarLayout::new(images.count()).action_at(point) {
                Some(SidebarAction::OpenSettings) => {
                    self.session.apply(JigsawCommand::ToggleSettings);
                }
                Some(SidebarAction::SelectImage(index)) => self.select_image(index, images, event_log),
                Some(SidebarAction::ShowAllImages) => self.show_image_picker = true,
                Some(SidebarAction::Upload) => {
                    if let Some(index) = upload_image(images, event_log) {
                        self.select_image(index, images, event_log);
                    }
                }
                Some(SidebarAction::TogglePreview) => {
                    self.session.apply(JigsawCommand::TogglePreview);
                }
                Some(SidebarAction::Reset) => {
                    self.apply(JigsawCommand::Reset, event_log);
                }
                None => {}
            }
            return SessionFlow::Continue;
        }

        self.session.apply(JigsawCommand::PointerDown(point))
    }

    fn apply(&mut self, command: JigsawCommand, event_log: &mut EventLog) -> SessionFlow {
        let flow = self.session.apply(command);
        if command == JigsawCommand::Reset {
            event_log.push("Jigsaw reset");
        }
        flow
    }

    fn select_image(&mut self, index: usize, images: &ImageLibrary, event_log: &mut EventLog) {
        if index == self.image_index || images.get(index).is_none() {
            return;
        }
        self.image_index = index;
        self.session.reset();
        if let Some(image) = images.get(index) {
            event_log.push(format!("Jigsaw image: {}", image.name));
        }
    }

    fn render(
        &self,
        painter: &egui::Painter,
        canvas: &Canvas,
        images: &ImageLibrary,
        texture: Option<egui::TextureId>,
        pointer: Option<Vec2>,
    ) {
        let board = self.session.board();
        let layout = *board.layout();
        let board_area = Area::new(0.0, 0.0, layout.board_size, layout.board_size);

        let stats = [
            format!("Time: {}", format_clock(self.session.elapsed_ticks())),
            format!("Placed: {}/{}", board.placed().len(), layout.piece_count()),
        ];
        SidebarLayout::new(images.count()).draw(painter, canvas, images, self.image_index, &stats);

        if self.session.show_preview() {
            if let Some(texture) = texture {
                painter.image(
                    texture,
                    canvas.rect(board_area),
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
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
            self.render_board(painter, canvas, texture, &layout);
        }

        self.render_carousel(painter, canvas, texture, &layout);

        if let (Some(held), Some(pointer)) = (board.held(), pointer)
            && let Some(piece) = board.piece(held.id)
        {
            let corner = pointer - held.offset;
            let size = layout.piece_size();
            let rect = canvas.rect(Area::new(corner.x, corner.y, size.x, size.y));
            if let Some(texture) = texture {
                painter.image(texture, rect, piece_uv(piece.row, piece.col, &layout), Color32::WHITE);
            }
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, HELD_BORDER), StrokeKind::Inside);
        }

        if self.session.show_settings() {
            self.render_settings(painter, canvas);
        }

        if self.session.is_complete() {
            draw_overlay(
                painter,
                canvas,
                board_area,
                Color32::from_white_alpha(150),
                "Puzzle Complete!",
                ACCENT_1,
                &format!("Time: {}", format_clock(self.session.elapsed_ticks())),
            );
        }
    }

    fn render_board(
        &self,
        painter: &egui::Painter,
        canvas: &Canvas,
        texture: Option<egui::TextureId>,
        layout: &JigsawLayout,
    ) {
        let board = self.session.board();
        let size = layout.piece_size();
        painter.rect_filled(
            canvas.rect(Area::new(0.0, 0.0, layout.board_size, layout.board_size)),
            0.0,
            BOARD_BACKGROUND,
        );

        for piece in board.pieces() {
            let rect = canvas.rect(Area::new(piece.target.x, piece.target.y, size.x, size.y));
            if !piece.correct {
                painter.rect_filled(rect, 0.0, SLOT_FILL);
                painter.rect_stroke(rect, 0.0, Stroke::new(2.0, SLOT_BORDER), StrokeKind::Inside);
                continue;
            }
            if let Some(texture) = texture {
                painter.image(texture, rect, piece_uv(piece.row, piece.col, layout), Color32::WHITE);
            }
            painter.rect_filled(rect, 0.0, CORRECT_FILL);
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, CORRECT_BORDER), StrokeKind::Inside);
        }
    }

    fn render_carousel(
        &self,
        painter: &egui::Painter,
        canvas: &Canvas,
        texture: Option<egui::TextureId>,
        layout: &JigsawLayout,
    ) {
        let board = self.session.board();
        let strip = Area::new(
            0.0,
            layout.carousel_top + layout.thumb_gap,
            layout.viewport_width,
            layout.carousel_height,
        );
        painter.rect_filled(canvas.rect(strip), 0.0, CAROUSEL_BACKGROUND);

        for thumb in board.visible_thumbnails() {
            let Some(piece) = board.piece(thumb.id) else {
                continue;
            };
            let rect = canvas.rect(Area::new(thumb.origin.x, thumb.origin.y, layout.thumb_size, layout.thumb_size));
            painter.rect_filled(rect, 0.0, TILE_BG);
            if let Some(texture) = texture {
                painter.image(texture, rect, piece_uv(piece.row, piece.col, layout), Color32::WHITE);
            }
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, SLOT_BORDER), StrokeKind::Inside);
        }

        let (left, right) = arrow_buttons(layout);
        draw_button(painter, canvas, left, ACCENT_4, "<");
        draw_button(painter, canvas, right, ACCENT_4, ">");
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

        let (fill, label) = if self.session.sound().effects {
            (ACCENT_2, "Piece Sound: ON")
        } else {
            (TILE_BG, "Piece Sound: OFF")
        };
        draw_button(painter, canvas, PIECE_SOUND_BUTTON, fill, label);
        draw_button(painter, canvas, QUIT_BUTTON, ACCENT_4, "Quit Game");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_library() -> ImageLibrary {
        ImageLibrary::load("this_directory_does_not_exist")
    }

    fn press(point: Vec2) -> FrameInput {
        FrameInput {
            pressed_at: Some(point),
            ..FrameInput::default()
        }
    }

    fn release(point: Vec2) -> FrameInput {
        FrameInput {
            released_at: Some(point),
            ..FrameInput::default()
        }
    }

    #[test]
    fn test_arrow_buttons_match_carousel() {
        let (left, right) = arrow_buttons(&JigsawLayout::default());
        assert_eq!(left, Area::new(10.0, 580.0, 30.0, 30.0));
        assert_eq!(right, Area::new(760.0, 580.0, 30.0, 30.0));
    }

    #[test]
    fn test_settings_buttons() {
        assert_eq!(settings_command_at(Vec2::new(300.0, 240.0)), JigsawCommand::TogglePieceSound);
        assert_eq!(settings_command_at(Vec2::new(300.0, 300.0)), JigsawCommand::Quit);
        assert_eq!(settings_command_at(Vec2::new(10.0, 10.0)), JigsawCommand::ToggleSettings);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(jigsaw_command_for_key(egui::Key::ArrowRight), Some(JigsawCommand::ScrollRight));
        assert_eq!(jigsaw_command_for_key(egui::Key::P), Some(JigsawCommand::TogglePreview));
        assert_eq!(jigsaw_command_for_key(egui::Key::ArrowUp), None);
    }

    #[test]
    fn test_piece_uv() {
        let uv = piece_uv(3, 1, &JigsawLayout::default());
        assert_eq!(uv.min, Pos2::new(0.25, 0.75));
        assert_eq!(uv.max, Pos2::new(0.5, 1.0));
    }

    #[test]
    fn test_drag_first_thumbnail_onto_its_slot() {
        let mut ui = JigsawGameUi::new(JigsawSettings::default(), SessionRng::new(2));
        let mut images = missing_library();
        let mut event_log = EventLog::new();

        // First thumbnail sits at (10, 560); grab it 5px inside its corner.
        let grab = Vec2::new(15.0, 565.0);
        ui.handle_input(&press(grab), &mut images, &mut event_log);
        assert!(ui.session.board().held().is_some());

        ui.handle_input(&release(Vec2::new(5.0, 5.0)), &mut images, &mut event_log);
        ui.report_events(&mut event_log);
        assert_eq!(ui.session.board().placed(), &[0]);
        assert!(event_log.entries().any(|entry| entry.contains("Piece 0 placed (1/16)")));
    }

    #[test]
    fn test_arrow_press_does_not_pick_up() {
        let mut ui = JigsawGameUi::new(JigsawSettings::default(), SessionRng::new(2));
        let mut images = missing_library();
        ui.handle_input(&press(Vec2::new(20.0, 590.0)), &mut images, &mut EventLog::new());
        assert!(ui.session.board().held().is_none());
    }
}
