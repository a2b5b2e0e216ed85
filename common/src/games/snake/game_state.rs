use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use glam::Vec2;

use crate::games::{Direction, ParticlePool, Rgb, SessionRng};
use crate::log;
use super::entity::Snake;
use super::settings::SnakeSettings;
use super::types::{colors, DeathReason, Obstacle, Point, SnakeInput, StepOutcome};

/// Particle speeds were tuned in pixels per frame on a 20 px cell.
const PIXELS_PER_CELL: f32 = 20.0;
const PLACEMENT_ATTEMPTS: usize = 100;

pub struct SnakeGameState {
    settings: SnakeSettings,
    rng: SessionRng,
    snake: Snake,
    food: Option<Point>,
    obstacle: Option<Obstacle>,
    particles: ParticlePool,
    score: u32,
    speed: f32,
    frame_count: u32,
    death_reason: Option<DeathReason>,
    food_pulse: f32,
    obstacle_glow: f32,
    ticks: u64,
}

/// Read-only view handed to the renderer once per frame.
pub struct SnakeRenderState<'a> {
    pub grid_width: usize,
    pub grid_height: usize,
    pub snake: &'a VecDeque<Point>,
    pub direction: Direction,
    pub food: Option<Point>,
    pub obstacle: Option<&'a Obstacle>,
    pub particles: &'a ParticlePool,
    pub score: u32,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
    pub obstacle_seconds_left: Option<u32>,
    pub obstacle_warning: bool,
    pub food_pulse: f32,
    pub obstacle_glow: f32,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSettings, rng: SessionRng) -> Self {
        let particles = ParticlePool::new(settings.particle_capacity);
        let start = Self::start_position(&settings);
        let mut state = Self {
            speed: settings.initial_speed,
            settings,
            rng,
            snake: Snake::new(start, Direction::Right),
            food: None,
            obstacle: None,
            particles,
            score: 0,
            frame_count: 0,
            death_reason: None,
            food_pulse: 0.0,
            obstacle_glow: 0.0,
            ticks: 0,
        };
        state.reset();
        state
    }

    fn start_position(settings: &SnakeSettings) -> Point {
        Point::new((settings.grid_width / 2) as i32, (settings.grid_height / 2) as i32)
    }

    /// Rebuilds the whole game: snake, food, obstacle, particles, score and speed.
    pub fn reset(&mut self) {
        self.snake = Snake::new(Self::start_position(&self.settings), Direction::Right);
        self.obstacle = None;
        self.particles.clear();
        self.score = 0;
        self.speed = self.settings.initial_speed;
        self.frame_count = 0;
        self.death_reason = None;
        self.food_pulse = 0.0;
        self.obstacle_glow = 0.0;
        self.food = self.generate_food();
        log!("Snake game started (seed {})", self.rng.seed());
    }

    /// Returns `false` when the player asked to leave the game.
    pub fn handle_input(&mut self, input: SnakeInput) -> bool {
        match input {
            SnakeInput::Turn(direction) => {
                if !self.is_game_over() {
                    self.snake.set_pending_direction(direction);
                }
                true
            }
            SnakeInput::Restart => {
                if self.is_game_over() {
                    self.reset();
                }
                true
            }
            SnakeInput::Quit => false,
        }
    }

    /// Advances one 60 Hz frame. Returns the movement outcome on frames where
    /// the movement cadence fires.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        self.ticks += 1;
        self.particles.update();

        // Food keeps pulsing and sparkling behind the game over overlay.
        self.food_pulse = (self.food_pulse + 0.1) % TAU;
        self.obstacle_glow = (self.obstacle_glow + 0.05) % TAU;

        if let Some(food) = self.food
            && self.rng.chance(self.settings.food_particle_chance)
        {
            self.emit(food, 3, 1.0, 30..=60, colors::FOOD);
        }

        if self.is_game_over() {
            return None;
        }

        self.update_obstacle();

        self.frame_count += 1;
        if self.frame_count as f32 >= self.speed {
            self.frame_count = 0;
            return Some(self.step());
        }
        None
    }

    /// One movement step: turn, collision checks in wall/self/obstacle order, then commit.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::Halted;
        }

        self.snake.apply_pending_direction();
        let head = self.snake.head();
        let next_head = self.snake.next_head();

        if !next_head.in_bounds(self.settings.grid_width, self.settings.grid_height) {
            return self.die(DeathReason::WallCollision, head, colors::HEAD);
        }
        if self.snake.contains(next_head) {
            return self.die(DeathReason::SelfCollision, head, colors::HEAD);
        }
        if self.obstacle.as_ref().is_some_and(|o| o.contains(next_head)) {
            return self.die(DeathReason::ObstacleCollision, head, colors::OBSTACLE);
        }

        let ate = self.food == Some(next_head);
        self.snake.advance(next_head, ate);

        if !ate {
            return StepOutcome::Moved;
        }

        self.score += 1;
        self.emit(next_head, 20, 2.0, 20..=40, colors::FOOD);
        self.food = self.generate_food();
        self.speed = (self.speed - self.settings.speed_step).max(self.settings.min_speed);
        log!(
            "Snake ate food at ({}, {}). Score: {}, speed: {:.1}",
            next_head.x,
            next_head.y,
            self.score,
            self.speed
        );
        StepOutcome::Ate { score: self.score }
    }

    fn die(&mut self, reason: DeathReason, head: Point, color: Rgb) -> StepOutcome {
        self.death_reason = Some(reason);
        self.emit(head, 30, 3.0, 20..=40, color);
        log!("Snake died: {:?} at score {}", reason, self.score);
        StepOutcome::Died(reason)
    }

    fn update_obstacle(&mut self) {
        if self.score < self.settings.obstacle_score_threshold {
            return;
        }

        match self.obstacle.as_mut() {
            None => {
                let Some(obstacle) = self.generate_obstacle() else {
                    return;
                };
                for cell in obstacle.cells {
                    self.emit(cell, 10, 2.0, 20..=40, colors::OBSTACLE);
                }
                log!(
                    "Obstacle spawned at ({}, {})",
                    obstacle.cells[0].x,
                    obstacle.cells[0].y
                );
                self.obstacle = Some(obstacle);
            }
            Some(obstacle) => {
                obstacle.remaining_ticks = obstacle.remaining_ticks.saturating_sub(1);
                if obstacle.remaining_ticks == 0 {
                    self.obstacle = None;
                    log!("Obstacle cleared");
                }
            }
        }
    }

    fn is_free_for_food(&self, pos: Point) -> bool {
        !self.snake.contains(pos) && !self.obstacle.as_ref().is_some_and(|o| o.contains(pos))
    }

    fn generate_food(&mut self) -> Option<Point> {
        let width = self.settings.grid_width;
        let height = self.settings.grid_height;

        for _ in 0..PLACEMENT_ATTEMPTS {
            let pos = Point::new(
                self.rng.random_range(0..width) as i32,
                self.rng.random_range(0..height) as i32,
            );
            if self.is_free_for_food(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Point> = (0..width * height)
            .map(|i| Point::from_index(i, width))
            .filter(|&p| self.is_free_for_food(p))
            .collect();
        self.rng.choose(&free).copied()
    }

    fn obstacle_fits(&self, top_left: Point) -> bool {
        Obstacle::at(top_left, 0)
            .cells
            .iter()
            .all(|&cell| !self.snake.contains(cell) && self.food != Some(cell))
    }

    fn generate_obstacle(&mut self) -> Option<Obstacle> {
        let max_x = self.settings.grid_width - 1;
        let max_y = self.settings.grid_height - 1;
        let lifetime = self.settings.obstacle_duration_ticks;

        for _ in 0..PLACEMENT_ATTEMPTS {
            let top_left = Point::new(
                self.rng.random_range(0..max_x) as i32,
                self.rng.random_range(0..max_y) as i32,
            );
            if self.obstacle_fits(top_left) {
                return Some(Obstacle::at(top_left, lifetime));
            }
        }

        let candidates: Vec<Point> = (0..max_x * max_y)
            .map(|i| Point::from_index(i, max_x))
            .filter(|&p| self.obstacle_fits(p))
            .collect();
        self.rng
            .choose(&candidates)
            .map(|&top_left| Obstacle::at(top_left, lifetime))
    }

    /// Particles live in grid units, centred on the cell.
    fn emit(
        &mut self,
        cell: Point,
        count: usize,
        pixel_speed: f32,
        life: RangeInclusive<u32>,
        color: Rgb,
    ) {
        let origin = Vec2::new(cell.x as f32 + 0.5, cell.y as f32 + 0.5);
        self.particles.burst(
            &mut self.rng,
            origin,
            count,
            pixel_speed / PIXELS_PER_CELL,
            life,
            color,
        );
    }

    pub fn render_state(&self) -> SnakeRenderState<'_> {
        let obstacle_seconds_left = self
            .obstacle
            .as_ref()
            .map(|o| o.remaining_ticks / self.settings.ticks_per_second);
        SnakeRenderState {
            grid_width: self.settings.grid_width,
            grid_height: self.settings.grid_height,
            snake: &self.snake.body,
            direction: self.snake.direction,
            food: self.food,
            obstacle: self.obstacle.as_ref(),
            particles: &self.particles,
            score: self.score,
            game_over: self.is_game_over(),
            death_reason: self.death_reason,
            obstacle_seconds_left,
            obstacle_warning: self.score + 1 == self.settings.obstacle_score_threshold,
            food_pulse: self.food_pulse,
            obstacle_glow: self.obstacle_glow,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.death_reason.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn obstacle(&self) -> Option<&Obstacle> {
        self.obstacle.as_ref()
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    #[cfg(test)]
    fn place(&mut self, snake: Snake, food: Option<Point>) {
        self.snake = snake;
        self.food = food;
    }

    #[cfg(test)]
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
