use serde::{Deserialize, Serialize};

use crate::config::{Validate, ensure_range};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SudokuSettings {
    /// Share of the 81 cells left blank.
    pub difficulty: f32,
    /// Ticks a status message stays on screen.
    pub message_ticks: u32,
}

impl Default for SudokuSettings {
    fn default() -> Self {
        Self {
            difficulty: 0.5,
            message_ticks: 60,
        }
    }
}

impl Validate for SudokuSettings {
    fn validate(&self) -> Result<(), String> {
        ensure_range("difficulty", self.difficulty, 0.0, 1.0)?;
        ensure_range("message_ticks", self.message_ticks, 1, 3600)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_out_of_range() {
        let settings = SudokuSettings {
            difficulty: 1.5,
            ..SudokuSettings::default()
        };
        assert!(settings.validate().is_err());
        assert!(SudokuSettings::default().validate().is_ok());
    }
}
