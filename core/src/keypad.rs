use crate::peripherals::KeyScanner;

/// # Keypad
/// Pressed status of the 16 hexadecimal keys `0..F`.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is held down, or `None` if `key` isn't on the keypad
    pub fn is_pressed(&self, key: u8) -> Option<bool> {
        self.keys.get(key as usize).copied()
    }

    /// # Panics
    /// If `key` is not in `0..=0xF`.
    pub fn press(&mut self, key: u8) {
        self.keys[key as usize] = true;
    }

    /// # Panics
    /// If `key` is not in `0..=0xF`.
    pub fn release(&mut self, key: u8) {
        self.keys[key as usize] = false;
    }

    /// The lowest numbered key held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }
}

impl From<[bool; 16]> for Keypad {
    fn from(keys: [bool; 16]) -> Self {
        Keypad { keys }
    }
}

/// A keypad scans as its own fixed state and never asks to quit.
impl KeyScanner for Keypad {
    fn scan(&mut self) -> Keypad {
        *self
    }

    fn quit_requested(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xA);
        assert_eq!(keypad.is_pressed(0xA), Some(true));
        keypad.release(0xA);
        assert_eq!(keypad.is_pressed(0xA), Some(false));
    }

    #[test]
    fn test_out_of_range_key() {
        assert_eq!(Keypad::new().is_pressed(0x10), None);
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xC);
        keypad.press(0x3);
        assert_eq!(keypad.first_pressed(), Some(0x3));
    }
}
