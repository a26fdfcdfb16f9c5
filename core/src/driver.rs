use std::time::Instant;

use log::info;

use crate::chip8::Chip8;
use crate::error::DriverError;
use crate::instruction::Cycle;
use crate::peripherals::{AudioDevice, KeyScanner, RenderSurface, TickSource};

/// Why the driver loop stopped without an error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// The user closed the window or pressed escape
    Quit,
    /// The program executed 00FD
    Halted,
}

/// # Driver
/// Runs a `Chip8` against its peripherals.
///
/// Each iteration executes one instruction (or polls the keypad while blocked
/// on Fx0A), renders after a draw, delivers owed timer ticks, drives the beeper
/// and finally sleeps out the rest of the instruction period.
pub struct Driver<R, A, K, T> {
    render: R,
    audio: A,
    keys: K,
    ticks: T,
    last_cycle: Instant,
}

impl<R, A, K, T> Driver<R, A, K, T>
where
    R: RenderSurface,
    A: AudioDevice,
    K: KeyScanner,
    T: TickSource,
{
    pub fn new(render: R, audio: A, keys: K, ticks: T) -> Self {
        Driver {
            render,
            audio,
            keys,
            ticks,
            last_cycle: Instant::now(),
        }
    }

    /// Runs `chip8` until the user quits, the program halts or an error occurs
    pub fn run(&mut self, chip8: &mut Chip8) -> Result<Exit, DriverError> {
        let exit = loop {
            if let Some(exit) = self.run_once(chip8)? {
                break exit;
            }
        };
        self.audio.silence();
        info!("stopped: {:?}", exit);
        Ok(exit)
    }

    /// A single iteration of the loop; `Some` once the loop should stop
    pub fn run_once(&mut self, chip8: &mut Chip8) -> Result<Option<Exit>, DriverError> {
        let config = *chip8.config();

        let cycle = if chip8.is_blocked() {
            chip8.poll_key(&self.keys.scan())
        } else {
            chip8.step(&mut self.keys)?
        };

        if cycle == Cycle::Draw {
            self.render
                .render(chip8.frame_buffer(), config.color)
                .map_err(DriverError::Render)?;
        }

        for _ in 0..self.ticks.pending_ticks() {
            chip8.tick();
        }

        if config.sound && chip8.sound_active() {
            self.audio.beep();
        } else {
            self.audio.silence();
        }

        if self.keys.quit_requested() {
            return Ok(Some(Exit::Quit));
        }
        if cycle == Cycle::Exit {
            return Ok(Some(Exit::Halted));
        }

        // Handle timing
        if let Some(cycle_time) = config.cycle_time() {
            let elapsed_cycle_time = self.last_cycle.elapsed();
            if cycle_time > elapsed_cycle_time {
                std::thread::sleep(cycle_time - elapsed_cycle_time);
            }
        }
        self.last_cycle = Instant::now();

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, Config};
    use crate::error::ExecutionError;
    use crate::frame_buffer::FrameBuffer;
    use crate::keypad::Keypad;

    #[derive(Default)]
    struct CountingSurface {
        renders: usize,
        fail: bool,
    }

    impl RenderSurface for CountingSurface {
        fn render(&mut self, _frame: &FrameBuffer, _color: Color) -> Result<(), String> {
            if self.fail {
                return Err(String::from("window gone"));
            }
            self.renders += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingAudio {
        beeps: usize,
        silences: usize,
    }

    impl AudioDevice for CountingAudio {
        fn beep(&mut self) {
            self.beeps += 1;
        }

        fn silence(&mut self) {
            self.silences += 1;
        }
    }

    /// Never presses anything and asks to quit on the nth check
    struct QuitAfter {
        checks: usize,
        limit: usize,
    }

    impl QuitAfter {
        fn new(limit: usize) -> Self {
            QuitAfter { checks: 0, limit }
        }
    }

    impl KeyScanner for QuitAfter {
        fn scan(&mut self) -> Keypad {
            Keypad::new()
        }

        fn quit_requested(&mut self) -> bool {
            self.checks += 1;
            self.checks >= self.limit
        }
    }

    /// Owes one tick on every call
    #[derive(Default)]
    struct OneTick {
        calls: usize,
    }

    impl TickSource for OneTick {
        fn pending_ticks(&mut self) -> u32 {
            self.calls += 1;
            1
        }
    }

    struct NoTicks;

    impl TickSource for NoTicks {
        fn pending_ticks(&mut self) -> u32 {
            0
        }
    }

    fn unthrottled() -> Config {
        Config {
            clock_speed: 0,
            ..Config::default()
        }
    }

    fn machine(rom: &[u8], config: Config) -> Chip8 {
        Chip8::with_config(rom, config).unwrap()
    }

    #[test]
    fn test_renders_once_per_draw() {
        // draw, draw, then spin on a jump
        let mut chip8 = machine(&[0xD0, 0x15, 0xD0, 0x15, 0x12, 0x04], unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(5),
            NoTicks,
        );

        assert_eq!(driver.run(&mut chip8).unwrap(), Exit::Quit);
        assert_eq!(driver.render.renders, 2);
        assert!(chip8.frame_buffer().is_blank());
    }

    #[test]
    fn test_clear_does_not_render() {
        let mut chip8 = machine(&[0x00, 0xE0, 0x12, 0x02], unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(3),
            NoTicks,
        );

        driver.run(&mut chip8).unwrap();
        assert_eq!(driver.render.renders, 0);
    }

    #[test]
    fn test_quit_stops_immediately() {
        let mut chip8 = machine(&[0x12, 0x00], unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(1),
            NoTicks,
        );

        assert_eq!(driver.run_once(&mut chip8).unwrap(), Some(Exit::Quit));
    }

    #[test]
    fn test_exit_opcode_halts() {
        let mut chip8 = machine(&[0x00, 0xFD], unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(usize::MAX),
            NoTicks,
        );

        assert_eq!(driver.run(&mut chip8).unwrap(), Exit::Halted);
    }

    #[test]
    fn test_execution_error_stops_loop() {
        let mut chip8 = machine(&[0xFF, 0xFF], unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(usize::MAX),
            NoTicks,
        );

        match driver.run(&mut chip8) {
            Err(DriverError::Execution(ExecutionError::UnimplementedOpcode { opcode })) => {
                assert_eq!(opcode, 0xFFFF)
            }
            other => panic!("expected an unimplemented opcode, got {:?}", other),
        }
    }

    #[test]
    fn test_render_failure_stops_loop() {
        let mut chip8 = machine(&[0xD0, 0x15], unthrottled());
        let mut driver = Driver::new(
            CountingSurface {
                renders: 0,
                fail: true,
            },
            CountingAudio::default(),
            QuitAfter::new(usize::MAX),
            NoTicks,
        );

        assert!(matches!(
            driver.run(&mut chip8),
            Err(DriverError::Render(_))
        ));
    }

    #[test]
    fn test_ticks_delivered_while_blocked() {
        // V0 = 5; DT = V0; await key into V0
        let rom = [0x60, 0x05, 0xF0, 0x15, 0xF0, 0x0A];
        let config = Config {
            timers_while_blocked: true,
            ..unthrottled()
        };
        let mut chip8 = machine(&rom, config);
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(5),
            OneTick::default(),
        );

        assert_eq!(driver.run(&mut chip8).unwrap(), Exit::Quit);
        assert!(chip8.is_blocked());
        assert_eq!(driver.ticks.calls, 5);
        assert_eq!(chip8.state().timers.delay, 1);
    }

    #[test]
    fn test_timers_frozen_while_blocked_by_default() {
        let rom = [0x60, 0x05, 0xF0, 0x15, 0xF0, 0x0A];
        let mut chip8 = machine(&rom, unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(5),
            OneTick::default(),
        );

        driver.run(&mut chip8).unwrap();
        assert!(chip8.is_blocked());
        // the tick source is still drained every iteration
        assert_eq!(driver.ticks.calls, 5);
        assert_eq!(chip8.state().timers.delay, 4);
    }

    #[test]
    fn test_beeps_while_sound_timer_runs() {
        // V0 = 3; ST = V0; spin
        let rom = [0x60, 0x03, 0xF0, 0x18, 0x12, 0x04];
        let mut chip8 = machine(&rom, unthrottled());
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(3),
            NoTicks,
        );

        driver.run(&mut chip8).unwrap();
        assert_eq!(driver.audio.beeps, 2);
        // once before the timer starts and once on the way out
        assert_eq!(driver.audio.silences, 2);
    }

    #[test]
    fn test_no_beep_when_sound_disabled() {
        let rom = [0x60, 0x03, 0xF0, 0x18, 0x12, 0x04];
        let config = Config {
            sound: false,
            ..unthrottled()
        };
        let mut chip8 = machine(&rom, config);
        let mut driver = Driver::new(
            CountingSurface::default(),
            CountingAudio::default(),
            QuitAfter::new(3),
            NoTicks,
        );

        driver.run(&mut chip8).unwrap();
        assert_eq!(driver.audio.beeps, 0);
    }
}
