use common::games::sudoku::{BASE, CheckOutcome, SIDE, SudokuCommand, SudokuLayout, SudokuSession, SudokuSettings};
use common::games::{SessionFlow, SessionRng};
use eframe::egui::{self, Align2, Color32, Stroke, StrokeKind};
use glam::Vec2;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::event_log::EventLog;
use crate::ui::widgets::{
    ACCENT_1, ACCENT_2, ACCENT_3, ACCENT_4, Area, BACKGROUND, Canvas, FrameInput, TEXT_COLOR, TILE_BG,
    draw_button, draw_text, format_clock_padded,
};

const NEW_GAME_BUTTON: Area = Area::new(50.0, 80.0, 120.0, 40.0);
const CHECK_BUTTON: Area = Area::new(200.0, 80.0, 120.0, 40.0);
const SOLVE_BUTTON: Area = Area::new(350.0, 80.0, 120.0, 40.0);
const BACK_BUTTON: Area = Area::new(630.0, 80.0, 150.0, 40.0);

const CLUE_BG: Color32 = Color32::from_rgb(235, 245, 255);
const CLUE_DIGIT: Color32 = Color32::from_rgb(70, 70, 120);
const PLAYER_DIGIT: Color32 = Color32::from_rgb(0, 100, 0);
const INCORRECT_BG: Color32 = Color32::from_rgb(255, 200, 200);
const INCORRECT_DIGIT: Color32 = Color32::from_rgb(220, 0, 0);
const SELECTED_BG: Color32 = Color32::from_rgb(255, 250, 200);
const SELECTED_BORDER: Color32 = Color32::from_rgb(255, 165, 0);
const GRID_LINE: Color32 = Color32::from_gray(120);
const BOX_LINE: Color32 = Color32::from_gray(40);

pub fn sudoku_command_for_key(key: egui::Key) -> Option<SudokuCommand> {
    let digit = match key {
        egui::Key::Num1 => 1,
        egui::Key::Num2 => 2,
        egui::Key::Num3 => 3,
        egui::Key::Num4 => 4,
        egui::Key::Num5 => 5,
        egui::Key::Num6 => 6,
        egui::Key::Num7 => 7,
        egui::Key::Num8 => 8,
        egui::Key::Num9 => 9,
        egui::Key::Num0 | egui::Key::Backspace | egui::Key::Delete => 0,
        egui::Key::Escape => return Some(SudokuCommand::Quit),
        _ => return None,
    };
    Some(SudokuCommand::Place(digit))
}

/// Toolbar buttons first, anything else selects a cell.
pub fn sudoku_command_at(point: Vec2) -> SudokuCommand {
    if NEW_GAME_BUTTON.contains(point) {
        SudokuCommand::NewGame
    } else if CHECK_BUTTON.contains(point) {
        SudokuCommand::Check
    } else if SOLVE_BUTTON.contains(point) {
        SudokuCommand::Reveal
    } else if BACK_BUTTON.contains(point) {
        SudokuCommand::Quit
    } else {
        SudokuCommand::Select(point)
    }
}

pub struct SudokuGameUi {
    session: SudokuSession,
}

impl SudokuGameUi {
    pub fn new(settings: SudokuSettings, rng: SessionRng) -> Self {
        Self {
            session: SudokuSession::new(settings, SudokuLayout::default(), rng),
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
        event_log: &mut EventLog,
    ) -> SessionFlow {
        let input = FrameInput::collect(ctx, canvas);
        if self.handle_input(&input, event_log) == SessionFlow::Quit {
            return SessionFlow::Quit;
        }
        self.render(ui.painter(), canvas);
        ctx.request_repaint();
        SessionFlow::Continue
    }

    fn handle_input(&mut self, input: &FrameInput, event_log: &mut EventLog) -> SessionFlow {
        let commands = input
            .keys
            .iter()
            .filter_map(|&key| sudoku_command_for_key(key))
            .chain(input.pressed_at.map(sudoku_command_at));
        for command in commands {
            if self.apply(command, event_log) == SessionFlow::Quit {
                return SessionFlow::Quit;
            }
        }
        SessionFlow::Continue
    }

    fn apply(&mut self, command: SudokuCommand, event_log: &mut EventLog) -> SessionFlow {
        match command {
            SudokuCommand::Check => match self.session.check() {
                CheckOutcome::Correct => event_log.push(format!(
                    "Sudoku solved in {}",
                    format_clock_padded(self.session.elapsed_ticks())
                )),
                CheckOutcome::Incorrect(cells) => event_log.push(format!("Check: {} incorrect cells", cells.len())),
                CheckOutcome::Incomplete => {}
            },
            SudokuCommand::Reveal => {
                let cells = self.session.reveal();
                event_log.push(format!("Solve: {} incorrect cells", cells.len()));
            }
            SudokuCommand::NewGame => {
                self.session.apply(command);
                event_log.push("New sudoku started");
            }
            _ => return self.session.apply(command),
        }
        SessionFlow::Continue
    }

    fn render(&self, painter: &egui::Painter, canvas: &Canvas) {
        painter.rect_filled(canvas.rect(Area::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT)), 0.0, BACKGROUND);

        draw_text(
            painter,
            canvas,
            Vec2::new(WINDOW_WIDTH / 2.0, 40.0),
            Align2::CENTER_CENTER,
            "Sudoku Puzzle",
            36.0,
            TEXT_COLOR,
        );
        draw_text(
            painter,
            canvas,
            Vec2::new(WINDOW_WIDTH - 20.0, 40.0),
            Align2::RIGHT_CENTER,
            format!("Time: {}", format_clock_padded(self.session.elapsed_ticks())),
            24.0,
            TEXT_COLOR,
        );

        draw_button(painter, canvas, NEW_GAME_BUTTON, ACCENT_2, "New Game");
        draw_button(painter, canvas, CHECK_BUTTON, ACCENT_3, "Check");
        draw_button(painter, canvas, SOLVE_BUTTON, ACCENT_1, "Solve");
        draw_button(painter, canvas, BACK_BUTTON, ACCENT_4, "Back to Menu");

        self.render_cells(painter, canvas);
        self.render_grid_lines(painter, canvas);

        if let Some(message) = self.session.message() {
            let layout = self.session.game().layout();
            draw_text(
                painter,
                canvas,
                Vec2::new(WINDOW_WIDTH / 2.0, layout.origin.y + layout.grid_size() + 25.0),
                Align2::CENTER_CENTER,
                &message.text,
                22.0,
                TEXT_COLOR,
            );
        }
    }

    fn render_cells(&self, painter: &egui::Painter, canvas: &Canvas) {
        let game = self.session.game();
        let layout = game.layout();
        let highlighted = self.session.highlighted();

        for row in 0..SIDE {
            for col in 0..SIDE {
                let cell = (row, col);
                let origin = layout.cell_origin(cell);
                let area = Area::new(origin.x, origin.y, layout.cell_size, layout.cell_size);
                let incorrect = highlighted.contains(&cell);
                let clue = game.is_clue(cell);

                let fill = if incorrect {
                    INCORRECT_BG
                } else if game.selected() == Some(cell) {
                    SELECTED_BG
                } else if clue {
                    CLUE_BG
                } else {
                    TILE_BG
                };
                painter.rect_filled(canvas.rect(area), 0.0, fill);

                let digit = game.board().get(row, col);
                if digit != 0 {
                    let color = match (incorrect, clue) {
                        (true, _) => INCORRECT_DIGIT,
                        (false, true) => CLUE_DIGIT,
                        (false, false) => PLAYER_DIGIT,
                    };
                    draw_text(painter, canvas, area.center(), Align2::CENTER_CENTER, digit, 28.0, color);
                }
            }
        }

        if let Some(cell) = game.selected() {
            let origin = layout.cell_origin(cell);
            let area = Area::new(origin.x, origin.y, layout.cell_size, layout.cell_size);
            painter.rect_stroke(canvas.rect(area), 0.0, Stroke::new(3.0, SELECTED_BORDER), StrokeKind::Inside);
        }
    }

    fn render_grid_lines(&self, painter: &egui::Painter, canvas: &Canvas) {
        let layout = self.session.game().layout();
        let size = layout.grid_size();
        for i in 0..=SIDE {
            let stroke = if i % BASE == 0 {
                Stroke::new(3.0, BOX_LINE)
            } else {
                Stroke::new(1.0, GRID_LINE)
            };
            let offset = i as f32 * layout.cell_size;
            painter.line_segment(
                [
                    canvas.pos(layout.origin + Vec2::new(offset, 0.0)),
                    canvas.pos(layout.origin + Vec2::new(offset, size)),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    canvas.pos(layout.origin + Vec2::new(0.0, offset)),
                    canvas.pos(layout.origin + Vec2::new(size, offset)),
                ],
                stroke,
            );
        }
    }
}
