mod board;
mod session;
mod settings;

pub use board::SlidingBoard;
pub use session::{SlidingCommand, SlidingEvent, SlidingSession};
pub use settings::{ShuffleMode, SlidingSettings, SUPPORTED_GRID_SIZES};
