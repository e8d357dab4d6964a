//! Renderer: turn the live set into draw calls
//!
//! Appearance is a pure function of particle state and frame time. Nothing in
//! here mutates a particle.

use core::f32::consts::PI;

use crate::clock::FrameClock;
use crate::color::Rgba;
use crate::particle::{Falling, Particle, Rising, Star};
use crate::settings::{Scene, Settings, StarfieldSettings};
use crate::store::ParticleStore;
use crate::surface::{Bounds, RenderContext};

/// What to draw for one particle this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgba,
}

/// Rockets fade in linearly as they climb.
pub fn rising_alpha(max_alpha: f32, progress: f32) -> f32 {
    max_alpha * progress
}

/// Shards fade out linearly as they age.
pub fn falling_alpha(max_alpha: f32, progress: f32) -> f32 {
    max_alpha * (1.0 - progress)
}

/// `min + max * (sin(2π (t / period + phase)) + 1) / 2`, not clamped.
pub fn twinkle(min: f32, max: f32, period: f32, phase: f32, elapsed: f32) -> f32 {
    let cycles = elapsed / period + phase;
    min + max * ((libm::sinf(cycles * 2.0 * PI) + 1.0) / 2.0)
}

/// 0 before `offset`, 1 from `offset + duration` on, linear in between.
pub fn fade_in_ramp(elapsed: f32, offset: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= offset { 1.0 } else { 0.0 };
    }
    ((elapsed - offset) / duration).clamp(0.0, 1.0)
}

/// Single hump over the streak's life, zero once it is over.
pub fn shooting_star_alpha(seconds_alive: f32, life: f32) -> f32 {
    if seconds_alive > life {
        0.0
    } else {
        libm::sinf(PI * seconds_alive / life)
    }
}

/// One-time sky fade-in, 0 at start and exactly 1 from `fade_seconds` on.
pub fn background_alpha(elapsed: f32, fade_seconds: f32) -> f32 {
    if fade_seconds <= 0.0 {
        return 1.0;
    }
    (elapsed / fade_seconds).clamp(0.0, 1.0)
}

pub fn star_alpha(star: &Star, elapsed: f32) -> f32 {
    let t = &star.twinkle;
    twinkle(t.min, t.max, t.period, t.phase, elapsed)
        * fade_in_ramp(elapsed, star.fade_in.offset, star.fade_in.duration)
}

/// Appearance of `particle` at host time `now`.
pub fn sprite(particle: &Particle, clock: &FrameClock, now: f64, settings: &Settings) -> Sprite {
    let tint = particle.tint();
    match particle {
        Particle::Rising(Rising { x, y, progress, .. }) => Sprite {
            x: *x,
            y: *y,
            radius: settings.fireworks.radius,
            color: tint.with_alpha(rising_alpha(settings.fireworks.max_alpha, *progress)),
        },
        Particle::Falling(Falling { x, y, progress, .. }) => Sprite {
            x: *x,
            y: *y,
            radius: settings.fireworks.radius,
            color: tint.with_alpha(falling_alpha(settings.fireworks.max_alpha, *progress)),
        },
        Particle::Star(star) => Sprite {
            x: star.x,
            y: star.y,
            radius: star.size / 2.0,
            color: tint.with_alpha(star_alpha(star, clock.seconds_since_start(now))),
        },
        Particle::ShootingStar(streak) => {
            let (x, y) = streak.position(now);
            Sprite {
                x,
                y,
                radius: streak.size / 2.0,
                color: tint.with_alpha(shooting_star_alpha(streak.seconds_alive(now), streak.life)),
            }
        }
    }
}

/// Both gradient stops of the sky at `elapsed` seconds.
pub fn sky_stops(cfg: &StarfieldSettings, elapsed: f32) -> (Rgba, Rgba) {
    let alpha = background_alpha(elapsed, cfg.background_fade_in_seconds);
    (cfg.dark_sky.with_alpha(alpha), cfg.light_sky.with_alpha(alpha))
}

fn paint_sky<C: RenderContext>(ctx: &mut C, bounds: Bounds, cfg: &StarfieldSettings, elapsed: f32) {
    let (top, bottom) = sky_stops(cfg, elapsed);
    ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height, cfg.dark_sky.with_alpha(1.0));
    ctx.fill_vertical_gradient(0.0, 0.0, bounds.width, bounds.height, top, bottom);
}

fn paint_sprite<C: RenderContext>(ctx: &mut C, sprite: Sprite) {
    ctx.fill_circle(sprite.x, sprite.y, sprite.radius, sprite.color);
}

/// Paint one frame: reset, scale to device pixels, background, steady
/// particles, transient particles, reset transform.
pub fn paint<C: RenderContext, const N: usize>(
    ctx: &mut C,
    store: &ParticleStore<N>,
    bounds: Bounds,
    pixel_ratio: f32,
    clock: &FrameClock,
    now: f64,
    settings: &Settings,
) {
    ctx.reset();
    ctx.scale(pixel_ratio, pixel_ratio);

    match settings.scene {
        Scene::Starfield => paint_sky(ctx, bounds, &settings.starfield, clock.seconds_since_start(now)),
        // Fireworks draw straight onto the cleared surface
        Scene::Fireworks => {}
    }

    for particle in store.iter().filter(|p| !p.is_transient()) {
        paint_sprite(ctx, sprite(particle, clock, now, settings));
    }
    for particle in store.iter().filter(|p| p.is_transient()) {
        paint_sprite(ctx, sprite(particle, clock, now, settings));
    }

    ctx.reset_transform();
}
