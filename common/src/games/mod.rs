mod grid;
mod particles;
mod session_flow;
mod session_rng;
mod sound_settings;

pub mod jigsaw;
pub mod sliding_puzzle;
pub mod snake;
pub mod sudoku;

pub use grid::{Direction, GridPos};
pub use particles::{Particle, ParticlePool, Rgb};
pub use session_flow::SessionFlow;
pub use session_rng::SessionRng;
pub use sound_settings::SoundSettings;
