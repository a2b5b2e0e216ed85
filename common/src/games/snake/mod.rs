mod game_state;
mod settings;
mod entity;
mod types;

pub use game_state::{SnakeGameState, SnakeRenderState};
pub use settings::SnakeSettings;
pub use entity::Snake;
pub use types::{DeathReason, Obstacle, Point, SnakeInput, StepOutcome, colors};
