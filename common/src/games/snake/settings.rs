use serde::{Deserialize, Serialize};

use crate::config::{Validate, ensure_range};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Ticks between two movement steps at the start of a game.
    pub initial_speed: f32,
    /// Subtracted from the movement interval each time food is eaten.
    pub speed_step: f32,
    /// Floor for the movement interval.
    pub min_speed: f32,
    pub obstacle_score_threshold: u32,
    pub obstacle_duration_ticks: u32,
    pub food_particle_chance: f32,
    pub particle_capacity: usize,
    pub ticks_per_second: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 25,
            initial_speed: 10.0,
            speed_step: 0.2,
            min_speed: 5.0,
            obstacle_score_threshold: 4,
            obstacle_duration_ticks: 600,
            food_particle_chance: 0.1,
            particle_capacity: 512,
            ticks_per_second: 60,
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        ensure_range("grid_width", self.grid_width, 5, 100)?;
        ensure_range("grid_height", self.grid_height, 5, 100)?;
        ensure_range("initial_speed", self.initial_speed, 1.0, 120.0)?;
        ensure_range("speed_step", self.speed_step, 0.0, 10.0)?;
        ensure_range("min_speed", self.min_speed, 1.0, self.initial_speed)?;
        ensure_range("obstacle_duration_ticks", self.obstacle_duration_ticks, 1, 36_000)?;
        ensure_range("food_particle_chance", self.food_particle_chance, 0.0, 1.0)?;
        ensure_range("particle_capacity", self.particle_capacity, 16, 8192)?;
        ensure_range("ticks_per_second", self.ticks_per_second, 1, 240)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SnakeSettings::default().validate().is_ok());
    }

    #[test]
    fn test_nan_values_rejected() {
        let settings = SnakeSettings {
            food_particle_chance: f32::NAN,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = SnakeSettings {
            initial_speed: f32::NAN,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_min_speed_above_initial_rejected() {
        let settings = SnakeSettings {
            min_speed: 12.0,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_tiny_grid_rejected() {
        let settings = SnakeSettings {
            grid_width: 2,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
