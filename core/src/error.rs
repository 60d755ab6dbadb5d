use thiserror::Error;

/// Fatal interpreter faults.
///
/// Every variant shuts the interpreter down; there are no retries. An
/// unrecognized opcode is deliberately absent from this list -- it executes
/// as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("program is {size} bytes but only {max} bytes fit above the entry point")]
    CapacityExceeded { size: usize, max: usize },

    #[error("memory access out of bounds at {address:#06X}")]
    OutOfBounds { address: u16 },

    #[error("call stack overflow past {depth} frames")]
    StackOverflow { depth: usize },

    #[error("subroutine return with an empty call stack")]
    StackUnderflow,
}
