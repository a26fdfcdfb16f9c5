use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, ROM_START, SPRITE_SHEET};
use crate::error::{ExecutionError, LoadError};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// Layout:
/// - `0x000..0x050` the font sprite sheet
/// - `0x050..0x200` zeroed; historically reserved for the interpreter
/// - `0x200..` the ROM, zero padded to the end of memory
///
/// Every access is bounds checked; reaching past `0xFFF` is an `ExecutionError`.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Builds memory seeded with the sprite sheet and a ROM
    ///
    /// # Arguments
    /// * `rom` raw ROM bytes to place at `ROM_START`
    pub fn initialize(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let mut memory = Memory::default();
        let start = ROM_START as usize;
        memory.cells[start..start + rom.len()].copy_from_slice(rom);

        Ok(memory)
    }

    pub fn read(&self, address: u16) -> Result<u8, ExecutionError> {
        self.cells
            .get(address as usize)
            .copied()
            .ok_or(ExecutionError::MemoryOutOfBounds {
                address: address as usize,
            })
    }

    pub fn write(&mut self, address: u16, byte: u8) -> Result<(), ExecutionError> {
        let cell = self
            .cells
            .get_mut(address as usize)
            .ok_or(ExecutionError::MemoryOutOfBounds {
                address: address as usize,
            })?;
        *cell = byte;
        Ok(())
    }

    /// Borrows `len` bytes starting at `address`
    pub fn slice(&self, address: u16, len: usize) -> Result<&[u8], ExecutionError> {
        let range = Self::range(address, len)?;
        Ok(&self.cells[range])
    }

    /// Mutably borrows `len` bytes starting at `address`
    pub fn slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8], ExecutionError> {
        let range = Self::range(address, len)?;
        Ok(&mut self.cells[range])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Reports the first offending address when the range leaves memory
    fn range(address: u16, len: usize) -> Result<std::ops::Range<usize>, ExecutionError> {
        let start = address as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(ExecutionError::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

/// Memory holding only the sprite sheet
impl Default for Memory {
    fn default() -> Self {
        let mut cells = [0; MEMORY_SIZE];
        cells[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { cells }
    }
}
