use crate::constants::{DEFAULT_CYCLES_PER_TICK, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Interpreter configuration, consumed by the controller at construction.
///
/// Display geometry and the instruction-rate/timer-rate pairing are inputs
/// rather than executor constants; some programs assume non-default timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Display width in pixels.
    pub width: usize,
    /// Display height in pixels.
    pub height: usize,
    /// Instructions executed for every 60Hz timer tick.
    pub cycles_per_tick: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            cycles_per_tick: DEFAULT_CYCLES_PER_TICK,
        }
    }
}
