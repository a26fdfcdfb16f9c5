use crate::constants::{ROM_START, STACK_SIZE};
use crate::error::{ExecutionError, LoadError};
use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::timers::Timers;

/// Whether the CPU executes instructions or waits on Fx0A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Waiting for any key; its number goes into the register
    AwaitingKey(u8),
}

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always past the instruction being executed
///
/// Stack
/// - (stack) 16 return addresses
/// - (sp) the number of occupied stack slots
///
/// ## Memory
/// - 4096 bytes of addressable memory, see `Memory`
/// - the 64x32 frame buffer
///
/// ## Timing
/// - delay and sound timers, decremented at 60Hz by the driver
#[derive(Clone, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub run_state: RunState,
}

impl State {
    pub fn new(rom: &[u8]) -> Result<Self, LoadError> {
        Ok(State {
            memory: Memory::initialize(rom)?,
            ..State::default()
        })
    }

    pub fn push(&mut self, address: u16) -> Result<(), ExecutionError> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(ExecutionError::StackOverflow)?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, ExecutionError> {
        if self.sp == 0 {
            return Err(ExecutionError::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }
}

impl Default for State {
    fn default() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: ROM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            memory: Memory::default(),
            frame_buffer: FrameBuffer::new(),
            timers: Timers::default(),
            run_state: RunState::Running,
        }
    }
}
