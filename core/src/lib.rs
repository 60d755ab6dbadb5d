pub use chip8::{Chip8, RunState, StepOutcome};
pub use config::Config;
pub use error::Fault;
pub use state::FrameBuffer;

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod memory;
mod opcode;
mod operations;
pub mod sprites;
mod state;
