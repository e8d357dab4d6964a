//! Particle data model
//!
//! One tagged union covers every kind the animator knows about. The
//! simulation step and the renderer match on it exhaustively, so a new kind
//! does not compile until both know what to do with it.

use crate::color::{Rgb, Tint};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Particle {
    /// Fireworks particle on its way up, fading in.
    Rising(Rising),
    /// Shard of a burst, drifting and fading out.
    Falling(Falling),
    /// Steady background star.
    Star(Star),
    /// Transient streak with a fixed lifetime window.
    ShootingStar(ShootingStar),
}

impl Particle {
    /// Transients are painted after every steady particle.
    pub fn is_transient(&self) -> bool {
        match self {
            Particle::ShootingStar(_) => true,
            Particle::Rising(_) | Particle::Falling(_) | Particle::Star(_) => false,
        }
    }

    pub fn tint(&self) -> Tint {
        match self {
            Particle::Rising(p) => Tint::Hue(p.hue),
            Particle::Falling(p) => Tint::Hue(p.hue),
            Particle::Star(p) => Tint::Solid(p.color),
            Particle::ShootingStar(p) => Tint::Solid(p.color),
        }
    }
}

/// Velocities and progress speeds are per tick; `progress` runs 0 to 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rising {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub progress: f32,
    pub speed: f32,
    pub hue: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Falling {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub progress: f32,
    pub speed: f32,
    pub hue: f32,
}

impl Falling {
    /// Still below the top edge and not yet faded out.
    pub fn in_flight(&self) -> bool {
        self.y > 0.0 && self.progress < 1.0
    }
}

/// Brightness oscillation; period and phase are in seconds and cycles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Twinkle {
    pub min: f32,
    pub max: f32,
    pub period: f32,
    pub phase: f32,
}

/// One-time fade-in, in seconds after animator start.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FadeIn {
    pub duration: f32,
    pub offset: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub twinkle: Twinkle,
    pub fade_in: FadeIn,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShootingStar {
    /// Host timestamp (ms) of the frame that spawned it.
    pub start: f64,
    pub x0: f32,
    pub y0: f32,
    /// Radians; 0 points down the surface.
    pub angle: f32,
    /// Logical pixels per second.
    pub velocity: f32,
    /// Seconds.
    pub life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl ShootingStar {
    pub fn seconds_alive(&self, now: f64) -> f32 {
        ((now - self.start) / 1000.0) as f32
    }

    /// Closed form in elapsed time; nothing accumulates between frames.
    pub fn position(&self, now: f64) -> (f32, f32) {
        let travelled = self.velocity * self.seconds_alive(now);
        (
            self.x0 + libm::sinf(self.angle) * travelled,
            self.y0 + libm::cosf(self.angle) * travelled,
        )
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.start >= self.life as f64 * 1000.0
    }
}
