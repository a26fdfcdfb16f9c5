use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use chip8_core::{KeyScanner, Keypad};

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    match key {
        Keycode::X => Some(0x0),
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::Z => Some(0xA),
        Keycode::C => Some(0xB),
        Keycode::Num4 => Some(0xC),
        Keycode::R => Some(0xD),
        Keycode::F => Some(0xE),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

/// Tracks the keypad from sdl2 keyboard events.
/// Escape or closing the window requests a quit.
pub struct SdlKeys {
    events: EventPump,
    keypad: Keypad,
    quit: bool,
}

impl SdlKeys {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        Ok(SdlKeys {
            events: sdl.event_pump()?,
            keypad: Keypad::new(),
            quit: false,
        })
    }

    fn handle_events(&mut self) {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    if !self.quit {
                        info!("quit requested");
                    }
                    self.quit = true;
                }
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        self.keypad.press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        self.keypad.release(kc);
                    }
                }
                _ => continue,
            }
        }
    }
}

impl KeyScanner for SdlKeys {
    fn scan(&mut self) -> Keypad {
        self.handle_events();
        self.keypad
    }

    fn quit_requested(&mut self) -> bool {
        self.handle_events();
        self.quit
    }
}
