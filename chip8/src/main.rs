use std::path::PathBuf;

use clap::Parser;

use chip8_core::{Color, CLOCK_SPEED};

mod audio;
mod keymap;
mod run;

/// Runs a Chip-8 ROM in an sdl2 window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Whether the sound timer beeps
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    sound: bool,

    /// Cover the desktop instead of opening a window
    #[arg(long)]
    fullscreen: bool,

    /// Instructions per second, 0 runs unthrottled
    #[arg(long, default_value_t = CLOCK_SPEED)]
    clock_speed: u32,

    /// Color of lit pixels as RRGGBB
    #[arg(long, default_value = "ffffff", value_parser = parse_color)]
    color: Color,

    /// Keep the timers counting down while waiting for a key
    #[arg(long)]
    timers_while_blocked: bool,
}

fn parse_color(hex: &str) -> Result<Color, String> {
    Color::from_hex(hex).ok_or_else(|| format!("`{}` is not an RRGGBB color", hex))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)?;
    Ok(())
}
