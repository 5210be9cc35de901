//! Tick pacing

use std::thread;
use std::time::{Duration, Instant};

/// Blocks until the next tick is due
pub trait Pacer {
    fn wait_for_next_tick(&mut self);
}

/// Sleeps off whatever is left of each tick period since the previous call
#[derive(Debug, Clone)]
pub struct FixedRatePacer {
    period: Duration,
    last: Option<Instant>,
}

impl FixedRatePacer {
    pub fn from_hz(hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / hz.max(1),
            last: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Pacer for FixedRatePacer {
    fn wait_for_next_tick(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Runs ticks back to back (tests, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

impl Pacer for Unpaced {
    fn wait_for_next_tick(&mut self) {}
}
