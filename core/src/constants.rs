/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded at this address and execution starts from it.
/// Everything below is reserved for the interpreter's font table.
pub const ENTRY_POINT: u16 = 0x200;

/// Addresses are 12 bits wide.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Number of V registers.
pub const REGISTER_COUNT: usize = 16;

/// Maximum call nesting before the stack overflows.
pub const STACK_DEPTH: usize = 12;

/// Number of keys on the hex pad.
pub const KEY_COUNT: usize = 16;

/// Default display geometry.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Both timers count down at 60Hz regardless of instruction throughput.
pub const TIMER_RATE: u32 = 60;

/// Default number of instructions executed per timer tick, approximating a
/// ~500Hz CPU against the 60Hz timer cadence.
pub const DEFAULT_CYCLES_PER_TICK: u32 = 8;
