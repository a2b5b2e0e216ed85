use common::games::{SessionFlow, SessionRng};
use eframe::egui;

use crate::config::{Config, GameType};
use crate::event_log::EventLog;
use crate::images::ImageLibrary;
use crate::ui::widgets::Canvas;

use super::jigsaw::JigsawGameUi;
use super::sliding_puzzle::SlidingGameUi;
use super::snake::SnakeGameUi;
use super::sudoku::SudokuGameUi;

pub enum GameUi {
    Sliding(SlidingGameUi),
    Jigsaw(JigsawGameUi),
    Snake(SnakeGameUi),
    Sudoku(SudokuGameUi),
}

impl GameUi {
    pub fn new(game_type: GameType, config: &Config, rng: SessionRng) -> Self {
        match game_type {
            GameType::Sliding => GameUi::Sliding(SlidingGameUi::new(config.sliding.clone(), rng)),
            GameType::Jigsaw => GameUi::Jigsaw(JigsawGameUi::new(config.jigsaw.clone(), rng)),
            GameType::Snake => GameUi::Snake(SnakeGameUi::new(config.snake.clone(), rng)),
            GameType::Sudoku => GameUi::Sudoku(SudokuGameUi::new(config.sudoku.clone(), rng)),
        }
    }

    pub fn game_type(&self) -> GameType {
        match self {
            GameUi::Sliding(_) => GameType::Sliding,
            GameUi::Jigsaw(_) => GameType::Jigsaw,
            GameUi::Snake(_) => GameType::Snake,
            GameUi::Sudoku(_) => GameType::Sudoku,
        }
    }

    /// One fixed simulation step.
    pub fn tick(&mut self, event_log: &mut EventLog) {
        match self {
            GameUi::Sliding(ui) => ui.tick(),
            GameUi::Jigsaw(ui) => ui.tick(),
            GameUi::Snake(ui) => ui.tick(event_log),
            GameUi::Sudoku(ui) => ui.tick(),
        }
    }

    pub fn render_game(
        &mut self,
        egui_ui: &mut egui::Ui,
        ctx: &egui::Context,
        canvas: &Canvas,
        images: &mut ImageLibrary,
        event_log: &mut EventLog,
    ) -> SessionFlow {
        match self {
            GameUi::Sliding(ui) => ui.render_game(egui_ui, ctx, canvas, images, event_log),
            GameUi::Jigsaw(ui) => ui.render_game(egui_ui, ctx, canvas, images, event_log),
            GameUi::Snake(ui) => ui.render_game(egui_ui, ctx, canvas, event_log),
            GameUi::Sudoku(ui) => ui.render_game(egui_ui, ctx, canvas, event_log),
        }
    }
}
