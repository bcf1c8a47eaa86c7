//! Fixed-rate frame driver.

use std::thread;
use std::time::{Duration, Instant};

pub const TICK_RATE_HZ: u32 = 60;

/// Longest wall-clock gap fed into one tick. Keeps a stalled terminal from
/// expiring every power-up at once.
pub const MAX_FRAME_DT: f64 = 0.25;

/// Paces the main loop at a fixed rate and reports the real time between
/// frames.
pub struct FrameClock {
    period: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(rate_hz: u32) -> Self {
        FrameClock {
            period: period_for(rate_hz),
            frame_start: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Mark the start of a frame; returns seconds since the previous one.
    pub fn begin_frame(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.frame_start).as_secs_f64();
        self.frame_start = now;
        dt.min(MAX_FRAME_DT)
    }

    /// Sleep off whatever is left of the current frame.
    pub fn finish_frame(&self) {
        if let Some(rest) = remaining(self.period, self.frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

pub fn period_for(rate_hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / rate_hz.max(1) as f64)
}

/// Time left in a frame of length `period` after `elapsed`, if any.
pub fn remaining(period: Duration, elapsed: Duration) -> Option<Duration> {
    period.checked_sub(elapsed).filter(|d| !d.is_zero())
}
