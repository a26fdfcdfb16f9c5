use std::time::{Duration, Instant};

use crate::constants::TICK_PERIOD;
use crate::peripherals::TickSource;

/// # Timers
/// The delay and sound timers count down by one per 60Hz tick and stop at 0.
///
/// The sound timer does not play anything itself; whoever drives the machine
/// beeps while `sound_active` holds.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn decrement(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

/// Converts elapsed wall time into whole timer ticks.
///
/// Leftover time below one tick period is carried into the next call, so the
/// tick count tracks wall time regardless of how often it is sampled.
#[derive(Debug, Default)]
pub struct TickAccumulator {
    owed: Duration,
}

impl TickAccumulator {
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.owed += elapsed;
        let ticks = (self.owed.as_nanos() / TICK_PERIOD.as_nanos()) as u32;
        self.owed -= TICK_PERIOD * ticks;
        ticks
    }
}

/// `TickSource` backed by the system's monotonic clock
pub struct TickClock {
    last: Instant,
    accumulator: TickAccumulator,
}

impl TickClock {
    pub fn new() -> Self {
        TickClock {
            last: Instant::now(),
            accumulator: TickAccumulator::default(),
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for TickClock {
    fn pending_ticks(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.accumulator.accumulate(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrements_to_zero_and_stays() {
        let mut timers = Timers { delay: 5, sound: 2 };
        for _ in 0..5 {
            timers.decrement();
        }
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
        timers.decrement();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
    }

    #[test]
    fn test_timers_are_independent() {
        let mut timers = Timers { delay: 3, sound: 1 };
        assert!(timers.sound_active());
        timers.decrement();
        assert!(!timers.sound_active());
        assert_eq!(timers.delay, 2);
    }

    #[test]
    fn test_accumulator_counts_whole_ticks() {
        let mut accumulator = TickAccumulator::default();
        assert_eq!(accumulator.accumulate(Duration::from_millis(10)), 0);
        assert_eq!(accumulator.accumulate(Duration::from_millis(10)), 1);
        assert_eq!(accumulator.accumulate(Duration::from_millis(50)), 3);
    }

    #[test]
    fn test_accumulator_keeps_pace_with_wall_time() {
        let mut accumulator = TickAccumulator::default();
        // 500 instructions per second sampled for one second
        let ticks: u32 = (0..500)
            .map(|_| accumulator.accumulate(Duration::from_millis(2)))
            .sum();
        assert_eq!(ticks, 60);
    }

    #[test]
    fn test_accumulator_pays_out_backlog() {
        let mut accumulator = TickAccumulator::default();
        assert_eq!(accumulator.accumulate(Duration::from_secs(2)), 120);
        assert_eq!(accumulator.accumulate(Duration::from_millis(0)), 0);
    }
}
