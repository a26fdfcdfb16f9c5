use thiserror::Error;

/// Failures that prevent a ROM from being loaded; no execution begins.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("ROM is {size} bytes but at most {max} bytes fit in memory")]
    TooLarge { size: usize, max: usize },
}

/// Fatal conditions raised while executing an instruction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("opcode {opcode:#06X} is not implemented")]
    UnimplementedOpcode { opcode: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("key {key:#04X} is not on the keypad")]
    InvalidKey { key: u8 },
}

/// Reasons the driver loop stopped early.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("unable to render frame: {0}")]
    Render(String),
}
