//! Interfaces to the world outside the machine.
//!
//! The core never touches a window, speaker, keyboard or clock directly; the
//! driver loop talks to these traits and the runner supplies implementations.

use crate::config::Color;
use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;

/// Paints the framebuffer, once per executed draw
pub trait RenderSurface {
    fn render(&mut self, frame: &FrameBuffer, color: Color) -> Result<(), String>;
}

/// Plays the beep while the sound timer runs
pub trait AudioDevice {
    fn beep(&mut self);

    fn silence(&mut self) {}
}

/// Reads the physical keys mapped onto the keypad
pub trait KeyScanner {
    /// Fresh pressed status of every key
    fn scan(&mut self) -> Keypad;

    /// Whether the user asked to stop the emulator
    fn quit_requested(&mut self) -> bool;
}

/// Delivers 60Hz timer ticks
pub trait TickSource {
    /// Ticks owed since the last call
    fn pending_ticks(&mut self) -> u32;
}
