use std::time::{Duration, Instant};

/// Caps the loop at a fixed tick rate by sleeping out the rest of each slot.
pub struct FrameClock {
    last_ts: Instant,                // When the previous tick finished.
    tick: u64,                       // Ticks completed so far.
    tick_duration: Option<Duration>, // None runs as fast as possible.
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        FrameClock {
            last_ts: Instant::now(),
            tick: 0,
            tick_duration: Some(Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))),
        }
    }

    /// A clock that never sleeps, for headless runs.
    pub fn unlimited() -> Self {
        FrameClock { last_ts: Instant::now(), tick: 0, tick_duration: None }
    }

    /// Waits until the current slot is over and returns the number of ticks so far.
    pub fn tick(&mut self) -> u64 {
        if let Some(duration) = self.tick_duration {
            let elapsed = self.last_ts.elapsed();
            if elapsed < duration {
                std::thread::sleep(duration - elapsed);
            }
        }
        self.last_ts = Instant::now();
        self.tick += 1;
        self.tick
    }
}
