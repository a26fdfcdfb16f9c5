use log::debug;
use sdl2::audio::{AudioCallback, AudioDevice as SdlAudioDevice, AudioSpecDesired};

use chip8_core::AudioDevice;

const TONE: f32 = 440.0;
const VOLUME: f32 = 0.05;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for x in out.iter_mut() {
            *x = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Plays a square wave tone while the sound timer runs
pub struct Beeper {
    device: SdlAudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired_spec = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired_spec, |spec| {
            debug!("audio playback at {}Hz", spec.freq);
            SquareWave {
                phase_inc: TONE / spec.freq as f32,
                phase: 0.0,
                volume: VOLUME,
            }
        })?;

        Ok(Beeper {
            device,
            playing: false,
        })
    }
}

impl AudioDevice for Beeper {
    fn beep(&mut self) {
        if !self.playing {
            self.device.resume();
            self.playing = true;
        }
    }

    fn silence(&mut self) {
        if self.playing {
            self.device.pause();
            self.playing = false;
        }
    }
}
