//! Frame timing: animator start, last painted frame, last simulation update

/// Whether a frame callback also advances the fireworks simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickGate {
    /// Advance on every callback; the simulation speed follows the display
    /// refresh rate.
    EveryFrame,
    /// Advance only once at least `1000 / fps` milliseconds have passed since
    /// the previous advance. Rendering still happens every callback.
    FixedStep { fps: f32 },
}

impl TickGate {
    pub fn should_advance(&self, ms_since_update: f64) -> bool {
        match *self {
            TickGate::EveryFrame => true,
            TickGate::FixedStep { fps } => ms_since_update >= 1000.0 / fps as f64,
        }
    }
}

/// Host timestamps are milliseconds on a monotonic high-resolution clock.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameClock {
    start: f64,
    last_frame: f64,
    last_update: f64,
}

impl FrameClock {
    pub fn new(now: f64) -> Self {
        Self {
            start: now,
            last_frame: now,
            last_update: now,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn last_frame(&self) -> f64 {
        self.last_frame
    }

    pub fn seconds_since_start(&self, now: f64) -> f32 {
        ((now - self.start) / 1000.0) as f32
    }

    /// Never negative, even if the host hands out a timestamp older than the
    /// previous frame.
    pub fn seconds_since_last_frame(&self, now: f64) -> f32 {
        (((now - self.last_frame) / 1000.0) as f32).max(0.0)
    }

    pub fn ms_since_update(&self, now: f64) -> f64 {
        now - self.last_update
    }

    pub fn mark_frame(&mut self, now: f64) {
        self.last_frame = now;
    }

    pub fn mark_update(&mut self, now: f64) {
        self.last_update = now;
    }
}
