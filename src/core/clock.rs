use std::thread;
use std::time::{Duration, Instant};

/// Frame clock - caps the frame rate and measures frame duration
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Finish the current frame.
    ///
    /// Sleeps for whatever is left of the `1 / target_fps` budget, then
    /// returns the milliseconds since the previous tick. A `target_fps` of
    /// zero disables the cap.
    pub fn tick(&mut self, target_fps: u32) -> u64 {
        if let Some(budget) = frame_budget(target_fps) {
            let spent = self.last_tick.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        elapsed.as_millis() as u64
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Time allotted to one frame at `target_fps`, `None` when uncapped
pub fn frame_budget(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_nanos(1_000_000_000 / target_fps as u64))
}
