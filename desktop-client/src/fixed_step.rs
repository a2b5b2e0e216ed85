use crate::constants::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame times into a whole number of fixed simulation ticks.
#[derive(Debug, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks to run for a frame that took `dt` seconds. Leftover time carries
    /// over, but never more than `MAX_SUBSTEPS` ticks are returned at once.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_frames_accumulate() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT * 0.6), 0);
        assert_eq!(step.advance(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut step = FixedStep::new();
        let ticks = step.advance(1.0);
        assert!((5..=MAX_SUBSTEPS).contains(&ticks));
        assert!(step.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(-1.0), 0);
    }

    #[test]
    fn test_reset_drops_leftover() {
        let mut step = FixedStep::new();
        step.advance(SIM_DT * 0.9);
        step.reset();
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
    }
}
