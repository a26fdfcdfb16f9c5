use std::fs::File;
use std::io::BufReader;

use anyhow::{anyhow, Context};
use log::info;

use chip8_core::{Chip8, Config, Driver, Exit, TickClock};
use chip8_display::Display;

use crate::audio::Beeper;
use crate::keymap::SdlKeys;
use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<Exit> {
    let config = Config {
        clock_speed: args.clock_speed,
        sound: args.sound,
        color: args.color,
        timers_while_blocked: args.timers_while_blocked,
    };

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    let mut chip8 = Chip8::load_rom(&mut reader, config)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!("running {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let display = Display::new(&sdl, args.scale, args.fullscreen).map_err(|e| anyhow!(e))?;
    let beeper = Beeper::new(&sdl).map_err(|e| anyhow!(e))?;
    let keys = SdlKeys::new(&sdl).map_err(|e| anyhow!(e))?;

    let mut driver = Driver::new(display, beeper, keys, TickClock::new());
    Ok(driver.run(&mut chip8)?)
}
