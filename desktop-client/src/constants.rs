pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 650.0;

pub const TICKS_PER_SECOND: u32 = 60;
pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
pub const MAX_SUBSTEPS: u32 = 8;
/// Frame times above this are treated as a stall and clamped.
pub const MAX_FRAME_DT: f32 = 0.1;

pub const EVENT_LOG_SIZE: usize = 64;
