use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const SUPPORTED_GRID_SIZES: [usize; 2] = [3, 4];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleMode {
    /// Shuffle every tile label except the blank. Half of the boards are unsolvable.
    #[default]
    Labels,
    /// Random walk of legal moves away from the solved board.
    Slides,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidingSettings {
    pub grid_size: usize,
    pub shuffle_mode: ShuffleMode,
    pub slide_sound: bool,
}

impl Default for SlidingSettings {
    fn default() -> Self {
        Self {
            grid_size: 3,
            shuffle_mode: ShuffleMode::Labels,
            slide_sound: true,
        }
    }
}

impl Validate for SlidingSettings {
    fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_GRID_SIZES.contains(&self.grid_size) {
            return Err(format!(
                "grid_size must be one of {:?}, got {}",
                SUPPORTED_GRID_SIZES, self.grid_size
            ));
        }
        Ok(())
    }
}
