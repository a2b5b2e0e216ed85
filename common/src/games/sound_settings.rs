use serde::{Deserialize, Serialize};

const VOLUME_STEP: f32 = 0.1;

/// Sound preferences shared by the puzzle screens. Playback itself lives outside the core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub effects: bool,
    pub music: bool,
    pub music_volume: f32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            effects: true,
            music: false,
            music_volume: 0.5,
        }
    }
}

impl SoundSettings {
    pub fn toggle_effects(&mut self) -> bool {
        self.effects = !self.effects;
        self.effects
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music = !self.music;
        self.music
    }

    /// Moves the volume by whole steps of 0.1 and clamps to `[0, 1]`.
    pub fn adjust_volume(&mut self, steps: i32) -> f32 {
        let volume = self.music_volume + steps as f32 * VOLUME_STEP;
        self.music_volume = ((volume * 10.0).round() / 10.0).clamp(0.0, 1.0);
        self.music_volume
    }

    pub fn volume_percent(&self) -> u32 {
        (self.music_volume * 100.0).round() as u32
    }
}
