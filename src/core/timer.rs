/// Self-contained timers driven by the frame delta (seconds)

/// Countdown timer - fires once after duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Create countdown that is already running
    pub fn started(duration: f32) -> Self {
        let mut timer = Self::new(duration);
        timer.start();
        timer
    }

    /// Start (or restart) countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Stop without firing
    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tick with delta, returns true on the tick that completes it
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Get progress [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Seconds left, never negative
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

/// Linear opacity ramp, e.g. fade-from-black when a screen opens
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    from: f32,
    to: f32,
    timer: Countdown,
}

impl Fade {
    /// Opaque to transparent over `duration`
    pub fn fade_in(duration: f32) -> Self {
        Self {
            from: 1.0,
            to: 0.0,
            timer: Countdown::started(duration),
        }
    }

    /// Transparent to opaque over `duration`
    pub fn fade_out(duration: f32) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            timer: Countdown::started(duration),
        }
    }

    /// Advance, returns true once the ramp has finished
    pub fn tick(&mut self, delta: f32) -> bool {
        self.timer.tick(delta);
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        !self.timer.is_active()
    }

    /// Current opacity [0, 1]
    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.timer.progress()
    }

    /// Current opacity as an alpha byte
    pub fn alpha(&self) -> u8 {
        (self.value() * 255.0).round().clamp(0.0, 255.0) as u8
    }
}
