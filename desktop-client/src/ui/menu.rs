use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use common::games::{SessionFlow, SessionRng};
use common::{log, log_warn};
use eframe::egui::{self, Align2, Color32, Stroke, StrokeKind};
use glam::Vec2;

use super::game::GameUi;
use super::widgets::{
    ACCENT_1, ACCENT_2, Area, BACKGROUND, Canvas, FrameInput, TEXT_COLOR, draw_button, draw_text,
};
use crate::config::{Config, GameType};
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::event_log::EventLog;
use crate::fixed_step::FixedStep;
use crate::images::ImageLibrary;

type ArcadeConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

const SNAKE_ACCENT: Color32 = Color32::from_rgb(173, 255, 173);
const SUDOKU_ACCENT: Color32 = Color32::from_rgb(255, 253, 182);
const LAST_PLAYED_BORDER: Color32 = Color32::from_rgb(120, 120, 160);

const LAUNCHER_BUTTON_WIDTH: f32 = 280.0;
const LAUNCHER_BUTTON_HEIGHT: f32 = 180.0;

/// Launcher buttons in a 2x2 grid, reading order.
pub fn launcher_slots() -> [(GameType, Area, Color32); 4] {
    let slot = |x: f32, y: f32| Area::new(x, y, LAUNCHER_BUTTON_WIDTH, LAUNCHER_BUTTON_HEIGHT);
    [
        (GameType::Sliding, slot(100.0, 150.0), ACCENT_1),
        (GameType::Jigsaw, slot(420.0, 150.0), ACCENT_2),
        (GameType::Snake, slot(100.0, 370.0), SNAKE_ACCENT),
        (GameType::Sudoku, slot(420.0, 370.0), SUDOKU_ACCENT),
    ]
}

pub fn launcher_hit(point: Vec2) -> Option<GameType> {
    launcher_slots()
        .into_iter()
        .find(|(_, area, _)| area.contains(point))
        .map(|(game_type, _, _)| game_type)
}

pub struct MenuApp {
    config_manager: ArcadeConfigManager,
    config: Config,
    images: ImageLibrary,
    event_log: EventLog,
    step: FixedStep,
    game: Option<GameUi>,
    seed: Option<u64>,
    show_event_log: bool,
}

impl MenuApp {
    pub fn new(
        config_manager: ArcadeConfigManager,
        config: Config,
        images: ImageLibrary,
        seed: Option<u64>,
    ) -> Self {
        Self {
            config_manager,
            config,
            images,
            event_log: EventLog::new(),
            step: FixedStep::new(),
            game: None,
            seed,
            show_event_log: false,
        }
    }

    /// Replaces whatever is running with a fresh session of `game_type`.
    pub fn start_game(&mut self, game_type: GameType) {
        let rng = match self.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        log!("Starting {} with seed {}", game_type.title(), rng.seed());
        self.event_log.push(format!("Started {}", game_type.title()));

        self.game = Some(GameUi::new(game_type, &self.config, rng));
        self.step.reset();

        match self.config_manager.update_config(|config| config.last_game = Some(game_type)) {
            Ok(config) => self.config.last_game = config.last_game,
            Err(e) => log_warn!("Failed to save last game: {}", e),
        }
    }

    pub fn return_to_launcher(&mut self) {
        if let Some(game) = self.game.take() {
            log!("Leaving {}", game.game_type().title());
            self.event_log.push(format!("Back to launcher from {}", game.game_type().title()));
        }
    }

    fn window_title(&self) -> String {
        match &self.game {
            Some(game) => format!("Arcade - {}", game.game_type().title()),
            None => "Arcade".to_string(),
        }
    }

    fn render_launcher(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, canvas: &Canvas) {
        let input = FrameInput::collect(ctx, canvas);
        if let Some(game_type) = input.pressed_at.and_then(launcher_hit) {
            self.start_game(game_type);
            return;
        }

        let painter = ui.painter();
        painter.rect_filled(canvas.rect(Area::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT)), 0.0, BACKGROUND);
        draw_text(
            painter,
            canvas,
            Vec2::new(WINDOW_WIDTH / 2.0, 80.0),
            Align2::CENTER_CENTER,
            "Choose a Game",
            48.0,
            TEXT_COLOR,
        );

        for (game_type, area, fill) in launcher_slots() {
            draw_button(painter, canvas, area, fill, game_type.title());
            if self.config.last_game == Some(game_type) {
                painter.rect_stroke(
                    canvas.rect(area),
                    10.0,
                    Stroke::new(4.0, LAST_PLAYED_BORDER),
                    StrokeKind::Outside,
                );
            }
        }

        draw_text(
            painter,
            canvas,
            Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT - 30.0),
            Align2::CENTER_CENTER,
            "F2: event log",
            16.0,
            TEXT_COLOR,
        );
    }

    fn render_event_log(&mut self, ctx: &egui::Context) {
        let event_log = &self.event_log;
        egui::Window::new("Event Log")
            .open(&mut self.show_event_log)
            .default_size([360.0, 240.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if event_log.is_empty() {
                            ui.label(egui::RichText::new("No events yet...").italics().color(Color32::GRAY));
                        } else {
                            for entry in event_log.entries() {
                                ui.label(entry);
                            }
                        }
                    });
            });
    }
}

impl eframe::App for MenuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::F2)) {
            self.show_event_log = !self.show_event_log;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        let ticks = self.step.advance(ctx.input(|i| i.stable_dt));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let canvas = Canvas::new(ui.max_rect().min);
                let flow = match self.game.as_mut() {
                    Some(game) => {
                        for _ in 0..ticks {
                            game.tick(&mut self.event_log);
                        }
                        game.render_game(ui, ctx, &canvas, &mut self.images, &mut self.event_log)
                    }
                    None => {
                        self.render_launcher(ui, ctx, &canvas);
                        SessionFlow::Continue
                    }
                };
                if flow == SessionFlow::Quit {
                    self.return_to_launcher();
                }
            });

        self.render_event_log(ctx);
    }
}
