pub use chip8::Chip8;
pub use config::{Color, Config};
pub use constants::CLOCK_SPEED;
pub use driver::{Driver, Exit};
pub use error::{DriverError, ExecutionError, LoadError};
pub use frame_buffer::FrameBuffer;
pub use instruction::{Cycle, Instruction};
pub use keypad::Keypad;
pub use memory::Memory;
pub use opcode::Opcode;
pub use peripherals::{AudioDevice, KeyScanner, RenderSurface, TickSource};
pub use state::{RunState, State};
pub use timers::{TickAccumulator, TickClock, Timers};

mod chip8;
mod config;
pub mod constants;
mod driver;
pub mod error;
mod frame_buffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod peripherals;
pub mod state;
mod timers;
