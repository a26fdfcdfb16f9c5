use std::time::Duration;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Address at which ROMs are loaded and execution begins
pub const ROM_START: u16 = 0x200;

/// Largest ROM that fits between `ROM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - ROM_START as usize;

/// Number of return addresses the call stack can hold
pub const STACK_SIZE: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Default number of instructions executed per second
pub const CLOCK_SPEED: u32 = 500;

/// Frequency of the delay and sound timers
pub const TIMER_FREQUENCY: u32 = 60;

/// Wall time covered by a single timer tick
pub const TICK_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_FREQUENCY as u64);

/// Every font glyph is 5 rows of 8 pixels
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// Hexadecimal digits 0..F stored from address 0x000.
///
/// Only the high nibble of each row is used, e.g. `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
