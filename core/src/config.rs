use std::time::Duration;

use crate::constants::CLOCK_SPEED;

/// An opaque RGB color used to paint lit pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    /// Parses `RRGGBB`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// # Config
/// Runtime knobs shared by the machine and its driver loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second; 0 runs unthrottled
    pub clock_speed: u32,
    /// Whether the sound timer beeps
    pub sound: bool,
    /// Color of lit pixels
    pub color: Color,
    /// Whether timers keep counting down while waiting on Fx0A
    pub timers_while_blocked: bool,
}

impl Config {
    /// Wall time budgeted for one instruction
    pub fn cycle_time(&self) -> Option<Duration> {
        if self.clock_speed == 0 {
            None
        } else {
            Some(Duration::from_nanos(1_000_000_000 / u64::from(self.clock_speed)))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            sound: true,
            color: Color::WHITE,
            timers_while_blocked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(
            Color::from_hex("#00ff80"),
            Some(Color {
                r: 0x00,
                g: 0xFF,
                b: 0x80
            })
        );
        assert_eq!(Color::from_hex("ffffff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("fff"), None);
        assert_eq!(Color::from_hex("gg0000"), None);
    }

    #[test]
    fn test_cycle_time() {
        let config = Config::default();
        assert_eq!(config.cycle_time(), Some(Duration::from_millis(2)));
        let unthrottled = Config {
            clock_speed: 0,
            ..config
        };
        assert_eq!(unthrottled.cycle_time(), None);
    }
}
