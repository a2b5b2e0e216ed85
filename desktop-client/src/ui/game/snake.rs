use common::games::snake::{SnakeGameState, SnakeInput, SnakeRenderState, SnakeSettings, StepOutcome, colors};
use common::games::{Direction, SessionFlow, SessionRng};
use eframe::egui::{self, Align2, Color32, Stroke, StrokeKind};
use glam::Vec2;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::event_log::EventLog;
use crate::ui::widgets::{Area, Canvas, FrameInput, color, draw_text, faded};

const CELL_SIZE: f32 = 20.0;
const HUD_HEIGHT: f32 = 60.0;

const BACKGROUND: Color32 = Color32::from_rgb(40, 44, 52);
const GRID_COLOR: Color32 = Color32::from_rgb(58, 63, 72);
const HUD_BACKGROUND: Color32 = Color32::from_rgb(30, 34, 42);
const TEXT_COLOR: Color32 = Color32::from_rgb(236, 240, 241);
const ACCENT_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
const OBSTACLE_BORDER: Color32 = Color32::from_rgb(200, 160, 0);
const GAME_OVER_TINT: Color32 = Color32::from_rgba_premultiplied(35, 49, 63, 200);

pub fn snake_input_for_key(key: egui::Key) -> Option<SnakeInput> {
    match key {
        egui::Key::ArrowUp => Some(SnakeInput::Turn(Direction::Up)),
        egui::Key::ArrowDown => Some(SnakeInput::Turn(Direction::Down)),
        egui::Key::ArrowLeft => Some(SnakeInput::Turn(Direction::Left)),
        egui::Key::ArrowRight => Some(SnakeInput::Turn(Direction::Right)),
        egui::Key::R => Some(SnakeInput::Restart),
        egui::Key::Q | egui::Key::Escape => Some(SnakeInput::Quit),
        _ => None,
    }
}

/// Top-left of the grid so that it sits centred in the window.
fn grid_origin(state: &SnakeRenderState) -> Vec2 {
    let size = Vec2::new(state.grid_width as f32, state.grid_height as f32) * CELL_SIZE;
    ((Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT) - size) / 2.0).floor()
}

pub struct SnakeGameUi {
    state: SnakeGameState,
}

impl SnakeGameUi {
    pub fn new(settings: SnakeSettings, rng: SessionRng) -> Self {
        Self {
            state: SnakeGameState::new(settings, rng),
        }
    }

    pub fn tick(&mut self, event_log: &mut EventLog) {
        match self.state.tick() {
            Some(StepOutcome::Ate { score }) => event_log.push(format!("Food eaten, score {}", score)),
            Some(StepOutcome::Died(reason)) => {
                event_log.push(format!("Game over ({:?}), final score {}", reason, self.state.score()))
            }
            _ => {}
        }
    }

    pub fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        canvas: &Canvas,
        event_log: &mut EventLog,
    ) -> SessionFlow {
        let input = FrameInput::collect(ctx, canvas);
        for input in input.keys.into_iter().filter_map(snake_input_for_key) {
            let was_over = self.state.is_game_over();
            if !self.state.handle_input(input) {
                return SessionFlow::Quit;
            }
            if was_over && input == SnakeInput::Restart {
                event_log.push("Snake restarted");
            }
        }

        self.render(ui.painter(), canvas);
        ctx.request_repaint();
        SessionFlow::Continue
    }

    fn render(&self, painter: &egui::Painter, canvas: &Canvas) {
        let state = self.state.render_state();
        let origin = grid_origin(&state);

        painter.rect_filled(canvas.rect(Area::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT)), 0.0, BACKGROUND);
        self.render_grid(painter, canvas, &state, origin);
        self.render_food(painter, canvas, &state, origin);
        self.render_obstacle(painter, canvas, &state, origin);
        self.render_snake(painter, canvas, &state, origin);
        self.render_particles(painter, canvas, &state, origin);
        self.render_hud(painter, canvas, &state);
        if state.game_over {
            self.render_game_over(painter, canvas, &state);
        }
    }

    fn cell_area(origin: Vec2, x: i32, y: i32) -> Area {
        Area::new(
            origin.x + x as f32 * CELL_SIZE,
            origin.y + y as f32 * CELL_SIZE,
            CELL_SIZE,
            CELL_SIZE,
        )
    }

    fn render_grid(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState, origin: Vec2) {
        let size = Vec2::new(state.grid_width as f32, state.grid_height as f32) * CELL_SIZE;
        let stroke = Stroke::new(1.0, GRID_COLOR);
        for x in 0..=state.grid_width {
            let x = origin.x + x as f32 * CELL_SIZE;
            painter.line_segment(
                [canvas.pos(Vec2::new(x, origin.y)), canvas.pos(Vec2::new(x, origin.y + size.y))],
                stroke,
            );
        }
        for y in 0..=state.grid_height {
            let y = origin.y + y as f32 * CELL_SIZE;
            painter.line_segment(
                [canvas.pos(Vec2::new(origin.x, y)), canvas.pos(Vec2::new(origin.x + size.x, y))],
                stroke,
            );
        }
    }

    fn render_food(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState, origin: Vec2) {
        let Some(food) = state.food else {
            return;
        };
        let center = Self::cell_area(origin, food.x, food.y).center();
        let glow = state.food_pulse.sin() * 3.0 + 8.0;
        painter.circle_filled(canvas.pos(center), CELL_SIZE / 2.0 + glow, faded(colors::FOOD, 50));
        painter.circle_filled(canvas.pos(center), CELL_SIZE / 2.0 - 1.0, color(colors::FOOD));
    }

    fn render_obstacle(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState, origin: Vec2) {
        let Some(obstacle) = state.obstacle else {
            return;
        };
        let glow_alpha = (state.obstacle_glow.sin() * 30.0 + 30.0) as u8;
        for cell in obstacle.cells {
            let rect = canvas.rect(Self::cell_area(origin, cell.x, cell.y));
            painter.rect_filled(rect.expand(5.0), 5.0, faded(colors::OBSTACLE, glow_alpha));
            painter.rect_filled(rect, 3.0, color(colors::OBSTACLE));
            painter.rect_stroke(rect, 3.0, Stroke::new(2.0, OBSTACLE_BORDER), StrokeKind::Inside);
        }
    }

    fn render_snake(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState, origin: Vec2) {
        for (i, segment) in state.snake.iter().enumerate() {
            let rect = canvas.rect(Self::cell_area(origin, segment.x, segment.y)).shrink(1.0);
            let fill = if i == 0 { color(colors::HEAD) } else { color(colors::BODY) };
            painter.rect_filled(rect, 5.0, fill);

            if i == 0 {
                let (a, b) = match state.direction {
                    Direction::Right => (
                        egui::pos2(rect.right() - 6.0, rect.top() + 6.0),
                        egui::pos2(rect.right() - 6.0, rect.bottom() - 6.0),
                    ),
                    Direction::Left => (
                        egui::pos2(rect.left() + 6.0, rect.top() + 6.0),
                        egui::pos2(rect.left() + 6.0, rect.bottom() - 6.0),
                    ),
                    Direction::Up => (
                        egui::pos2(rect.left() + 6.0, rect.top() + 6.0),
                        egui::pos2(rect.right() - 6.0, rect.top() + 6.0),
                    ),
                    Direction::Down => (
                        egui::pos2(rect.left() + 6.0, rect.bottom() - 6.0),
                        egui::pos2(rect.right() - 6.0, rect.bottom() - 6.0),
                    ),
                };
                painter.circle_filled(a, 4.0, Color32::BLACK);
                painter.circle_filled(b, 4.0, Color32::BLACK);
            }
        }
    }

    fn render_particles(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState, origin: Vec2) {
        for particle in state.particles.iter() {
            let center = origin + particle.pos * CELL_SIZE;
            painter.circle_filled(
                canvas.pos(center),
                particle.size() as f32,
                faded(particle.color, particle.alpha()),
            );
        }
    }

    fn render_hud(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState) {
        painter.rect_filled(canvas.rect(Area::new(0.0, 0.0, WINDOW_WIDTH, HUD_HEIGHT)), 0.0, HUD_BACKGROUND);
        painter.line_segment(
            [canvas.pos(Vec2::new(0.0, HUD_HEIGHT)), canvas.pos(Vec2::new(WINDOW_WIDTH, HUD_HEIGHT))],
            Stroke::new(2.0, ACCENT_COLOR),
        );

        painter.rect_filled(canvas.rect(Area::new(30.0, 20.0, 30.0, 20.0)), 3.0, ACCENT_COLOR);
        draw_text(
            painter,
            canvas,
            Vec2::new(80.0, 30.0),
            Align2::LEFT_CENTER,
            format!("Score: {}", state.score),
            24.0,
            TEXT_COLOR,
        );

        if let Some(seconds) = state.obstacle_seconds_left {
            painter.rect_filled(
                canvas.rect(Area::new(WINDOW_WIDTH - 180.0, 22.0, 15.0, 15.0)),
                2.0,
                color(colors::OBSTACLE),
            );
            draw_text(
                painter,
                canvas,
                Vec2::new(WINDOW_WIDTH - 150.0, 30.0),
                Align2::LEFT_CENTER,
                format!("Obstacle: {}s", seconds),
                24.0,
                color(colors::OBSTACLE),
            );
        }

        if state.obstacle_warning {
            draw_text(
                painter,
                canvas,
                Vec2::new(WINDOW_WIDTH / 2.0, 30.0),
                Align2::CENTER_CENTER,
                "Warning: Obstacles will appear at next score!",
                20.0,
                color(colors::OBSTACLE),
            );
        }

        let controls = Area::new(10.0, WINDOW_HEIGHT - 50.0, 350.0, 40.0);
        painter.rect_filled(canvas.rect(controls), 5.0, HUD_BACKGROUND);
        painter.rect_stroke(canvas.rect(controls), 5.0, Stroke::new(2.0, ACCENT_COLOR), StrokeKind::Inside);
        draw_text(
            painter,
            canvas,
            Vec2::new(20.0, controls.center().y),
            Align2::LEFT_CENTER,
            "Controls: Arrow Keys | Q/ESC: Quit",
            20.0,
            TEXT_COLOR,
        );
    }

    fn render_game_over(&self, painter: &egui::Painter, canvas: &Canvas, state: &SnakeRenderState) {
        painter.rect_filled(
            canvas.rect(Area::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT)),
            0.0,
            GAME_OVER_TINT,
        );
        let center = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT) / 2.0;
        draw_text(
            painter,
            canvas,
            center + Vec2::new(2.0, -48.0),
            Align2::CENTER_CENTER,
            "GAME OVER",
            48.0,
            Color32::from_rgb(100, 0, 0),
        );
        draw_text(
            painter,
            canvas,
            center - Vec2::new(0.0, 50.0),
            Align2::CENTER_CENTER,
            "GAME OVER",
            48.0,
            Color32::from_rgb(200, 0, 0),
        );
        draw_text(
            painter,
            canvas,
            center + Vec2::new(0.0, 20.0),
            Align2::CENTER_CENTER,
            format!("Final Score: {}", state.score),
            24.0,
            TEXT_COLOR,
        );
        draw_text(
            painter,
            canvas,
            center + Vec2::new(0.0, 70.0),
            Align2::CENTER_CENTER,
            "Press R to Restart or Q/ESC to Quit",
            24.0,
            TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            snake_input_for_key(egui::Key::ArrowLeft),
            Some(SnakeInput::Turn(Direction::Left))
        );
        assert_eq!(snake_input_for_key(egui::Key::R), Some(SnakeInput::Restart));
        assert_eq!(snake_input_for_key(egui::Key::Escape), Some(SnakeInput::Quit));
        assert_eq!(snake_input_for_key(egui::Key::Q), Some(SnakeInput::Quit));
        assert_eq!(snake_input_for_key(egui::Key::Space), None);
    }

    #[test]
    fn test_default_grid_is_centred() {
        let ui = SnakeGameUi::new(SnakeSettings::default(), SessionRng::new(1));
        let state = ui.state.render_state();
        assert_eq!(grid_origin(&state), Vec2::new(100.0, 75.0));
    }

    #[test]
    fn test_tick_logs_game_over() {
        let settings = SnakeSettings {
            grid_width: 5,
            grid_height: 5,
            ..SnakeSettings::default()
        };
        let mut ui = SnakeGameUi::new(settings, SessionRng::new(3));
        let mut event_log = EventLog::new();
        // Heading right from the centre of a 5-wide grid hits the wall on the third step.
        for _ in 0..200 {
            ui.tick(&mut event_log);
        }
        assert!(ui.state.is_game_over());
        assert!(event_log.entries().any(|entry| entry.contains("Game over")));
    }
}
