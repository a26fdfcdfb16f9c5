use std::io::Read;

use log::{debug, error, info, trace};

use crate::config::Config;
use crate::error::{ExecutionError, LoadError};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::{Cycle, Instruction};
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::peripherals::KeyScanner;
use crate::state::{RunState, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns the complete machine `state`; independent instances share nothing.
///
/// Supplies interfaces for:
/// - loading roms
/// - stepping the CPU one instruction at a time
/// - resuming a CPU blocked on a key press
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    config: Config,
}

impl Chip8 {
    /// Creates a machine running `rom` with the default configuration
    pub fn new(rom: &[u8]) -> Result<Self, LoadError> {
        Self::with_config(rom, Config::default())
    }

    pub fn with_config(rom: &[u8], config: Config) -> Result<Self, LoadError> {
        let state = State::new(rom)?;
        info!("loaded {} byte ROM", rom.len());
        Ok(Chip8 { state, config })
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader over the raw ROM bytes
    /// * `config` runtime configuration
    pub fn load_rom(reader: &mut dyn Read, config: Config) -> Result<Self, LoadError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        Self::with_config(&rom, config)
    }

    /// Reads the opcode at the pc and moves the pc past it.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&mut self) -> Result<Opcode, ExecutionError> {
        let bytes = self.state.memory.slice(self.state.pc, 2)?;
        let op = Opcode::from([bytes[0], bytes[1]]);
        self.state.pc += 2;
        Ok(op)
    }

    /// Advances the CPU by a single instruction
    /// - polls for a key instead while blocked on Fx0A
    /// - otherwise fetches, decodes and executes the next opcode
    ///
    /// # Arguments
    /// * `keys` scanned whenever an instruction reads the keypad
    pub fn step(&mut self, keys: &mut dyn KeyScanner) -> Result<Cycle, ExecutionError> {
        if self.is_blocked() {
            return Ok(self.poll_key(&keys.scan()));
        }

        let pc = self.state.pc;
        let op = self.fetch()?;
        trace!(
            "{:03X}: {} v{:02X?} i{:04X}",
            pc,
            op,
            self.state.v,
            self.state.i
        );

        let state = &mut self.state;
        let result =
            Instruction::decode(op).and_then(|instruction| instruction.execute(state, keys));
        if let Err(e) = &result {
            error!("{} at {:#05X}", e, pc);
        }
        result
    }

    /// Resumes a CPU blocked on Fx0A once any key is held.
    ///
    /// The lowest held key is written to the waiting register. Without a held
    /// key nothing changes and the CPU stays blocked.
    pub fn poll_key(&mut self, keys: &Keypad) -> Cycle {
        let register = match self.state.run_state {
            RunState::Running => return Cycle::Continue,
            RunState::AwaitingKey(register) => register,
        };
        match keys.first_pressed() {
            Some(key) => {
                debug!("V{:X} received key {:X}", register, key);
                self.state.v[register as usize] = key;
                self.state.run_state = RunState::Running;
                Cycle::Continue
            }
            None => Cycle::Blocked,
        }
    }

    /// Applies one 60Hz timer tick.
    /// Timers are frozen while blocked on Fx0A unless configured otherwise.
    pub fn tick(&mut self) {
        if self.is_blocked() && !self.config.timers_while_blocked {
            return;
        }
        self.state.timers.decrement();
    }

    pub fn is_blocked(&self) -> bool {
        self.state.run_state != RunState::Running
    }

    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}
